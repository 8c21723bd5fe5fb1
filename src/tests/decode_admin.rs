//! End-to-end decoding of the administrator form.

use crate::{DecodeError, FormData, admin_from_form};

fn admin_form(status: &str) -> FormData {
    let mut form: FormData = [
        ("username", "root"),
        ("password", "s3cr3t"),
        ("email", "root@example.com"),
        ("status", status),
        ("allowed_ip", "127.0.0.1, ::1"),
        ("additional_info", "bootstrap account"),
    ]
    .into_iter()
    .collect();
    form.push_value("permissions", "add_users");
    form.push_value("permissions", "edit_users");
    form
}

#[test]
fn test_full_admin_decode() {
    let admin = admin_from_form(&admin_form("1")).unwrap();
    assert_eq!(admin.username, "root");
    assert_eq!(admin.password, "s3cr3t");
    assert_eq!(admin.email, "root@example.com");
    assert_eq!(admin.permissions, ["add_users", "edit_users"]);
    assert_eq!(admin.status, 1);
    assert_eq!(admin.filters.allow_list, ["127.0.0.1", "::1"]);
    assert_eq!(admin.additional_info, "bootstrap account");
    assert_eq!(admin.id, 0);
}

#[test]
fn test_malformed_status_rejects_with_echo() {
    let rejected = admin_from_form(&admin_form("enabled")).unwrap_err();
    assert_eq!(
        rejected.reason,
        DecodeError::MalformedNumber {
            field: "status".to_string(),
            value: "enabled".to_string(),
        }
    );
    assert_eq!(rejected.partial.username, "root");
    assert_eq!(rejected.partial.permissions, ["add_users", "edit_users"]);
    assert_eq!(rejected.partial.status, 0);
}

#[test]
fn test_empty_form_decodes_to_defaults_except_status() {
    // Status is the only fail-fast scalar on the admin form.
    let rejected = admin_from_form(&FormData::new()).unwrap_err();
    assert_eq!(
        rejected.reason,
        DecodeError::MalformedNumber {
            field: "status".to_string(),
            value: String::new(),
        }
    );
}
