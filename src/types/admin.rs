//! The administrator account aggregate assembled from the web form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Permission tokens the admin form offers.
pub const VALID_ADMIN_PERMISSIONS: &[&str] = &[
    "*",
    "add_users",
    "edit_users",
    "del_users",
    "view_users",
    "view_conns",
    "close_conns",
    "view_status",
    "manage_admins",
    "quota_scans",
    "manage_system",
];

/// Restrictions applied to an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminFilters {
    /// IP addresses and networks allowed to log in; empty means no
    /// restriction.
    pub allow_list: Vec<String>,
}

/// A fully decoded administrator account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Admin {
    /// Database identifier, assigned by the persistence layer.
    pub id: i64,
    pub username: String,
    /// Plaintext on add/change, hashed once persisted. Empty on update
    /// means "keep the stored password".
    pub password: String,
    pub email: String,
    pub permissions: Vec<String>,
    /// 1 enabled, 0 disabled.
    pub status: i32,
    pub filters: AdminFilters,
    pub additional_info: String,
}
