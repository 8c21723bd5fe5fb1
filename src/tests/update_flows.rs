//! Update flows: decode, merge over the stored record, persist.

use crate::types::{FsConfig, S3Config, User};
use crate::{
    ConfigStore, FormData, MemoryStore, REDACTED_SECRET, Secret, admin_from_form, folder_from_form,
    merge_admin_update, merge_user_update, user_from_form,
};

fn stored_s3_user(store: &mut MemoryStore) -> User {
    let user = User {
        username: "alice".to_string(),
        password: "$argon2id$stored-hash".to_string(),
        home_dir: "/srv/files/alice".to_string(),
        status: 1,
        fs_config: FsConfig::S3(S3Config {
            bucket: "backups".to_string(),
            region: "eu-north-1".to_string(),
            access_key: "AKIAEXAMPLE".to_string(),
            access_secret: Secret::Encrypted("vault:v1:ciphertext".to_string()),
            upload_part_size: 16,
            upload_concurrency: 4,
            ..S3Config::default()
        }),
        ..User::default()
    };
    store.add_user(user).unwrap();
    store.user_by_name("alice").unwrap()
}

fn s3_update_form(password: &str, secret: &str) -> FormData {
    [
        // The form echoes the stored account; the user left the
        // password blank and the access secret redacted.
        ("username", "alice"),
        ("password", password),
        ("home_dir", "/srv/files/alice"),
        ("uid", "0"),
        ("gid", "0"),
        ("max_sessions", "10"),
        ("quota_size", "0"),
        ("quota_files", "0"),
        ("upload_bandwidth", "0"),
        ("download_bandwidth", "0"),
        ("status", "1"),
        ("max_upload_file_size", "0"),
        ("fs_provider", "1"),
        ("s3_bucket", "backups"),
        ("s3_region", "eu-north-1"),
        ("s3_access_key", "AKIAEXAMPLE"),
        ("s3_access_secret", secret),
        ("s3_upload_part_size", "16"),
        ("s3_upload_concurrency", "4"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_user_update_retains_password_and_redacted_secret() {
    let mut store = MemoryStore::new();
    let stored = stored_s3_user(&mut store);

    let submitted = user_from_form(&s3_update_form("", REDACTED_SECRET)).unwrap();
    let merged = merge_user_update(&stored, submitted);

    assert_eq!(merged.id, stored.id);
    assert_eq!(merged.password, "$argon2id$stored-hash");
    let FsConfig::S3(config) = &merged.fs_config else {
        panic!("expected the S3 variant");
    };
    assert_eq!(
        config.access_secret,
        Secret::Encrypted("vault:v1:ciphertext".to_string())
    );

    store.update_user(merged).unwrap();
    let reloaded = store.user_by_name("alice").unwrap();
    assert_eq!(reloaded.password, "$argon2id$stored-hash");
}

#[test]
fn test_user_update_replaces_password_and_secret_when_submitted() {
    let mut store = MemoryStore::new();
    let stored = stored_s3_user(&mut store);

    let submitted = user_from_form(&s3_update_form("new password", "new secret")).unwrap();
    let merged = merge_user_update(&stored, submitted);

    assert_eq!(merged.password, "new password");
    let FsConfig::S3(config) = &merged.fs_config else {
        panic!("expected the S3 variant");
    };
    assert_eq!(config.access_secret, Secret::Plain("new secret".to_string()));
}

#[test]
fn test_user_update_ignores_a_submitted_username_change() {
    let mut store = MemoryStore::new();
    let stored = stored_s3_user(&mut store);

    let mut submitted = user_from_form(&s3_update_form("", REDACTED_SECRET)).unwrap();
    submitted.username = "mallory".to_string();
    let merged = merge_user_update(&stored, submitted);
    assert_eq!(merged.username, "alice");
}

#[test]
fn test_redacted_secret_survives_a_backend_change() {
    let mut store = MemoryStore::new();
    let stored = stored_s3_user(&mut store);

    let form = s3_update_form("", REDACTED_SECRET);
    let mut submitted = user_from_form(&form).unwrap();
    // Simulate the form switching the backend while leaving the secret
    // field redacted: there is no stored counterpart to carry over.
    submitted.fs_config = crate::fs_config_from_form(
        &[("fs_provider", "4"), ("crypt_passphrase", REDACTED_SECRET)]
            .into_iter()
            .collect::<FormData>(),
    )
    .unwrap();
    let merged = merge_user_update(&stored, submitted);
    let FsConfig::Crypt(config) = &merged.fs_config else {
        panic!("expected the Crypt variant");
    };
    assert_eq!(config.passphrase, Secret::Redacted);
}

#[test]
fn test_admin_update_flow() {
    let mut store = MemoryStore::new();
    let mut admin = admin_from_form(
        &[
            ("username", "root"),
            ("password", "initial"),
            ("status", "1"),
        ]
        .into_iter()
        .collect::<FormData>(),
    )
    .unwrap();
    admin.permissions = vec!["*".to_string()];
    store.add_admin(admin).unwrap();
    let stored = store.admin_by_name("root").unwrap();

    let submitted = admin_from_form(
        &[
            ("username", "root"),
            ("password", ""),
            ("email", "root@example.com"),
            ("status", "1"),
        ]
        .into_iter()
        .collect::<FormData>(),
    )
    .unwrap();
    let merged = merge_admin_update(&stored, submitted);
    assert_eq!(merged.id, stored.id);
    assert_eq!(merged.password, "initial");
    assert_eq!(merged.email, "root@example.com");

    store.update_admin(merged).unwrap();
    assert_eq!(store.admin_by_name("root").unwrap().email, "root@example.com");
}

#[test]
fn test_lookup_distinguishes_not_found_before_update() {
    let store = MemoryStore::new();
    let err = store.user_by_name("ghost").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_folder_add_flow() {
    let mut store = MemoryStore::new();
    let folder = folder_from_form(
        &[("mapped_path", "/srv/shared")]
            .into_iter()
            .collect::<FormData>(),
    );
    store.add_folder(folder).unwrap();
    assert_eq!(store.folders().len(), 1);
    assert_eq!(store.folders()[0].mapped_path, "/srv/shared");
    assert!(store.folders()[0].id > 0);
}
