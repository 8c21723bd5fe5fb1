//! Form decoding: turns submitted fields into validated aggregates.
//!
//! Scalar coercions are fail-fast: the first failure aborts the decode
//! and the rejection carries everything decoded so far, so the caller
//! can re-render the form pre-filled with an error message. The text
//! block grammars stay lenient throughout (see [`crate::parse`]).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::fields::FormData;
use crate::parse::{PathNormalization, path_keyed_values, split_delimited_values};
use crate::secret::Secret;
use crate::types::{
    Admin, AdminFilters, AzBlobConfig, BaseFolder, CryptConfig, FilesystemProvider, FsConfig,
    GcsConfig, PermissionTree, S3Config, SftpConfig, User, UserFilters, VirtualFolder,
};

/// Timestamp format accepted by the expiration date field.
pub const WEB_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A rejected form: the decode error plus every field decoded before
/// the failure, so the form can be redisplayed without losing input.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected<T> {
    pub partial: T,
    pub reason: DecodeError,
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl<T: fmt::Debug> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

fn parse_number<N: FromStr>(form: &FormData, field: &str) -> Result<N, DecodeError> {
    let value = form.value(field);
    value.parse().map_err(|_| DecodeError::MalformedNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_storage_number<N: FromStr>(form: &FormData, field: &str) -> Result<N, DecodeError> {
    let value = form.value(field);
    value.parse().map_err(|_| DecodeError::StorageVariantField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn secret_from_form(form: &FormData, field: &str) -> Secret {
    Secret::from_form_value(form.value(field))
}

/// Decode the `virtual_folders` block: one
/// `virtual_path::mapped_path[::quota_files[::quota_size]]` record per
/// line. Unparsable quota overrides independently fall back to `-1`,
/// the one deliberate exception to the fail-fast numeric policy.
///
/// Known limitation: the line is split on `::` generically, so a mapped
/// path containing `::` desynchronizes the optional quota segments.
fn virtual_folders_from_form(form: &FormData) -> Vec<VirtualFolder> {
    let mut folders = Vec::new();
    for line in split_delimited_values(form.value("virtual_folders"), "\n") {
        let mapping: Vec<&str> = line.split("::").collect();
        if mapping.len() < 2 {
            continue;
        }
        let virtual_path = mapping[0].trim();
        if virtual_path.is_empty() {
            continue;
        }
        let mut folder = VirtualFolder {
            virtual_path: virtual_path.to_string(),
            mapped_path: mapping[1].trim().to_string(),
            ..VirtualFolder::default()
        };
        if let Some(quota_files) = mapping.get(2).and_then(|v| v.trim().parse().ok()) {
            folder.quota_files = quota_files;
        }
        if let Some(quota_size) = mapping.get(3).and_then(|v| v.trim().parse().ok()) {
            folder.quota_size = quota_size;
        }
        folders.push(folder);
    }
    folders
}

/// Build the permission tree: the multi-valued `permissions` field
/// becomes the `/` entry, the `sub_dirs_permissions` block contributes
/// one entry per directory. Sub-directory paths are kept as submitted;
/// a `/` line overrides the root entry.
fn permissions_from_form(form: &FormData) -> PermissionTree {
    let mut permissions = PermissionTree::new();
    permissions.insert("/".to_string(), form.values("permissions").to_vec());
    for (dir, perms) in path_keyed_values(
        form.value("sub_dirs_permissions"),
        PathNormalization::Verbatim,
    ) {
        permissions.insert(dir, perms);
    }
    permissions
}

fn user_filters_from_form(form: &FormData) -> UserFilters {
    UserFilters {
        allowed_ip: split_delimited_values(form.value("allowed_ip"), ","),
        denied_ip: split_delimited_values(form.value("denied_ip"), ","),
        denied_login_methods: form.values("ssh_login_methods").to_vec(),
        denied_protocols: form.values("denied_protocols").to_vec(),
        file_extensions: crate::filters::merge_allow_deny(
            path_keyed_values(form.value("allowed_extensions"), PathNormalization::Clean),
            path_keyed_values(form.value("denied_extensions"), PathNormalization::Clean),
        ),
        file_patterns: crate::filters::merge_allow_deny(
            path_keyed_values(form.value("allowed_patterns"), PathNormalization::Clean),
            path_keyed_values(form.value("denied_patterns"), PathNormalization::Clean),
        ),
        max_upload_file_size: 0,
    }
}

fn s3_config_from_form(form: &FormData) -> Result<S3Config, DecodeError> {
    Ok(S3Config {
        bucket: form.value("s3_bucket").to_string(),
        region: form.value("s3_region").to_string(),
        access_key: form.value("s3_access_key").to_string(),
        access_secret: secret_from_form(form, "s3_access_secret"),
        endpoint: form.value("s3_endpoint").to_string(),
        storage_class: form.value("s3_storage_class").to_string(),
        key_prefix: form.value("s3_key_prefix").to_string(),
        upload_part_size: parse_storage_number(form, "s3_upload_part_size")?,
        upload_concurrency: parse_storage_number(form, "s3_upload_concurrency")?,
    })
}

fn gcs_config_from_form(form: &FormData) -> Result<GcsConfig, DecodeError> {
    let mut config = GcsConfig {
        bucket: form.value("gcs_bucket").to_string(),
        storage_class: form.value("gcs_storage_class").to_string(),
        key_prefix: form.value("gcs_key_prefix").to_string(),
        credentials: Secret::Empty,
        automatic_credentials: !form.value("gcs_auto_credentials").is_empty(),
    };
    // A missing credentials file means "leave unset": on update the
    // stored blob stays in place, on add the automatic mode applies.
    let Some(upload) = form.attachment("gcs_credential_file") else {
        return Ok(config);
    };
    if upload.content().is_empty() {
        return Err(DecodeError::EmptyCredentialFile);
    }
    config.credentials = Secret::Plain(String::from_utf8_lossy(upload.content()).into_owned());
    config.automatic_credentials = false;
    Ok(config)
}

fn azblob_config_from_form(form: &FormData) -> Result<AzBlobConfig, DecodeError> {
    Ok(AzBlobConfig {
        container: form.value("az_container").to_string(),
        account_name: form.value("az_account_name").to_string(),
        account_key: secret_from_form(form, "az_account_key"),
        sas_url: form.value("az_sas_url").to_string(),
        endpoint: form.value("az_endpoint").to_string(),
        key_prefix: form.value("az_key_prefix").to_string(),
        access_tier: form.value("az_access_tier").to_string(),
        use_emulator: !form.value("az_use_emulator").is_empty(),
        upload_part_size: parse_storage_number(form, "az_upload_part_size")?,
        upload_concurrency: parse_storage_number(form, "az_upload_concurrency")?,
    })
}

fn sftp_config_from_form(form: &FormData) -> SftpConfig {
    SftpConfig {
        endpoint: form.value("sftp_endpoint").to_string(),
        username: form.value("sftp_username").to_string(),
        password: secret_from_form(form, "sftp_password"),
        private_key: secret_from_form(form, "sftp_private_key"),
        fingerprints: split_delimited_values(form.value("sftp_fingerprints"), "\n"),
        prefix: form.value("sftp_prefix").to_string(),
    }
}

/// Select and decode the storage backend named by the `fs_provider`
/// discriminant. An absent or unrecognized discriminant falls back to
/// the local filesystem, which needs no further fields.
pub fn fs_config_from_form(form: &FormData) -> Result<FsConfig, DecodeError> {
    let provider = form
        .value("fs_provider")
        .parse::<usize>()
        .ok()
        .and_then(FilesystemProvider::from_repr)
        .unwrap_or(FilesystemProvider::Local);
    debug!(event = "DecodeFsConfig", provider = %provider);
    let config = match provider {
        FilesystemProvider::Local => FsConfig::Local,
        FilesystemProvider::S3 => FsConfig::S3(s3_config_from_form(form)?),
        FilesystemProvider::GoogleCloudStorage => {
            FsConfig::GoogleCloudStorage(gcs_config_from_form(form)?)
        }
        FilesystemProvider::AzureBlob => FsConfig::AzureBlob(azblob_config_from_form(form)?),
        FilesystemProvider::Crypt => FsConfig::Crypt(CryptConfig {
            passphrase: secret_from_form(form, "crypt_passphrase"),
        }),
        FilesystemProvider::Sftp => FsConfig::Sftp(sftp_config_from_form(form)),
    };
    Ok(config)
}

fn expiration_millis_from_form(form: &FormData) -> Result<i64, DecodeError> {
    let raw = form.value("expiration_date");
    if raw.trim().is_empty() {
        return Ok(0);
    }
    let parsed = NaiveDateTime::parse_from_str(raw, WEB_DATE_TIME_FORMAT)
        .map_err(|_| DecodeError::DateFormat(raw.to_string()))?;
    Ok(parsed.and_utc().timestamp_millis())
}

/// The fail-fast portion of the user decode. Fields already assigned
/// stay on `user` when a later one fails, preserving the echo.
fn user_scalars_into(user: &mut User, form: &FormData) -> Result<(), DecodeError> {
    user.uid = parse_number(form, "uid")?;
    user.gid = parse_number(form, "gid")?;
    user.max_sessions = parse_number(form, "max_sessions")?;
    user.quota_size = parse_number(form, "quota_size")?;
    user.quota_files = parse_number(form, "quota_files")?;
    user.upload_bandwidth = parse_number(form, "upload_bandwidth")?;
    user.download_bandwidth = parse_number(form, "download_bandwidth")?;
    user.status = parse_number(form, "status")?;
    user.expiration_date = expiration_millis_from_form(form)?;
    user.filters.max_upload_file_size = parse_number(form, "max_upload_file_size")?;
    user.fs_config = fs_config_from_form(form)?;
    Ok(())
}

/// Decode a full user aggregate from the submitted form.
pub fn user_from_form(form: &FormData) -> Result<User, Rejected<User>> {
    let mut user = User {
        username: form.value("username").to_string(),
        password: form.value("password").to_string(),
        public_keys: split_delimited_values(form.value("public_keys"), "\n"),
        home_dir: form.value("home_dir").to_string(),
        virtual_folders: virtual_folders_from_form(form),
        permissions: permissions_from_form(form),
        filters: user_filters_from_form(form),
        additional_info: form.value("additional_info").to_string(),
        ..User::default()
    };
    if let Err(reason) = user_scalars_into(&mut user, form) {
        warn!(event = "DecodeUser", phase = "Rejected", reason = %reason);
        return Err(Rejected { partial: user, reason });
    }
    debug!(
        event = "DecodeUser",
        phase = "Assembled",
        username = %user.username,
        provider = %user.fs_config.provider()
    );
    Ok(user)
}

/// Decode an administrator aggregate from the submitted form.
pub fn admin_from_form(form: &FormData) -> Result<Admin, Rejected<Admin>> {
    let mut admin = Admin {
        username: form.value("username").to_string(),
        password: form.value("password").to_string(),
        email: form.value("email").to_string(),
        permissions: form.values("permissions").to_vec(),
        filters: AdminFilters {
            allow_list: split_delimited_values(form.value("allowed_ip"), ","),
        },
        additional_info: form.value("additional_info").to_string(),
        ..Admin::default()
    };
    match parse_number(form, "status") {
        Ok(status) => admin.status = status,
        Err(reason) => {
            warn!(event = "DecodeAdmin", phase = "Rejected", reason = %reason);
            return Err(Rejected { partial: admin, reason });
        }
    }
    debug!(event = "DecodeAdmin", phase = "Assembled", username = %admin.username);
    Ok(admin)
}

/// Decode a standalone folder definition; its form carries only the
/// filesystem path the folder maps to.
pub fn folder_from_form(form: &FormData) -> BaseFolder {
    BaseFolder {
        mapped_path: form.value("mapped_path").to_string(),
        ..BaseFolder::default()
    }
}

/// Merge a decoded user update over the stored record. Identity is
/// immutable, an empty submitted password keeps the stored one, and
/// redacted storage secrets are carried over from the stored
/// configuration.
pub fn merge_user_update(stored: &User, mut submitted: User) -> User {
    submitted.id = stored.id;
    submitted.username = stored.username.clone();
    if submitted.password.is_empty() {
        submitted.password = stored.password.clone();
    }
    submitted.fs_config.restore_redacted_secrets(&stored.fs_config);
    submitted
}

/// Merge a decoded admin update over the stored record: same identity
/// and password rules as [`merge_user_update`].
pub fn merge_admin_update(stored: &Admin, mut submitted: Admin) -> Admin {
    submitted.id = stored.id;
    submitted.username = stored.username.clone();
    if submitted.password.is_empty() {
        submitted.password = stored.password.clone();
    }
    submitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_virtual_folders_with_and_without_quotas() {
        let form = form(&[(
            "virtual_folders",
            "/data::/mnt/data::100::1048576\n/logs::/mnt/logs",
        )]);
        let folders = virtual_folders_from_form(&form);
        assert_eq!(
            folders,
            vec![
                VirtualFolder {
                    virtual_path: "/data".to_string(),
                    mapped_path: "/mnt/data".to_string(),
                    quota_files: 100,
                    quota_size: 1_048_576,
                },
                VirtualFolder {
                    virtual_path: "/logs".to_string(),
                    mapped_path: "/mnt/logs".to_string(),
                    quota_files: -1,
                    quota_size: -1,
                },
            ]
        );
    }

    #[test]
    fn test_virtual_folder_bad_quota_defaults_without_error() {
        let form = form(&[("virtual_folders", "/data::/mnt/data::lots::1024")]);
        let folders = virtual_folders_from_form(&form);
        assert_eq!(folders[0].quota_files, -1);
        assert_eq!(folders[0].quota_size, 1024);
    }

    #[test]
    fn test_virtual_folder_malformed_lines_dropped() {
        let form = form(&[("virtual_folders", "no marker here\n::/mnt/orphan\n")]);
        assert!(virtual_folders_from_form(&form).is_empty());
    }

    #[test]
    fn test_permission_tree_always_has_root() {
        let permissions = permissions_from_form(&FormData::new());
        assert_eq!(permissions.len(), 1);
        assert!(permissions["/"].is_empty());
    }

    #[test]
    fn test_permission_tree_merges_subdir_lines() {
        let mut form = FormData::new();
        form.push_value("permissions", "*");
        form.push_value("sub_dirs_permissions", "/sub::read,write\n/sub::list");
        let permissions = permissions_from_form(&form);
        assert_eq!(permissions["/"], ["*"]);
        assert_eq!(permissions["/sub"], ["read", "write", "list"]);
    }

    #[test]
    fn test_expiration_empty_means_never() {
        assert_eq!(expiration_millis_from_form(&FormData::new()).unwrap(), 0);
    }

    #[test]
    fn test_expiration_fixed_timestamp() {
        let form = form(&[("expiration_date", "2024-01-15 10:00:00")]);
        assert_eq!(
            expiration_millis_from_form(&form).unwrap(),
            1_705_312_800_000
        );
    }

    #[test]
    fn test_expiration_garbage_is_an_error() {
        let form = form(&[("expiration_date", "next tuesday")]);
        assert_eq!(
            expiration_millis_from_form(&form).unwrap_err(),
            DecodeError::DateFormat("next tuesday".to_string())
        );
    }

    #[test]
    fn test_unrecognized_provider_defaults_to_local() {
        for value in ["", "banana", "42", "-1"] {
            let form = form(&[("fs_provider", value)]);
            assert_eq!(fs_config_from_form(&form).unwrap(), FsConfig::Local);
        }
    }

    #[test]
    fn test_folder_from_form() {
        let form = form(&[("mapped_path", "/srv/shared")]);
        let folder = folder_from_form(&form);
        assert_eq!(folder.mapped_path, "/srv/shared");
        assert_eq!(folder.id, 0);
    }
}
