//! The user account aggregate assembled from the web form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::filters::FilterRecord;
use crate::types::folder::VirtualFolder;
use crate::types::fs::FsConfig;

/// Granted permission tokens per directory. The tree always carries an
/// entry for `/`.
pub type PermissionTree = IndexMap<String, Vec<String>>;

/// Permission tokens the web form offers per directory.
pub const VALID_PERMISSIONS: &[&str] = &[
    "*",
    "list",
    "download",
    "upload",
    "overwrite",
    "delete",
    "rename",
    "create_dirs",
    "create_symlinks",
    "chmod",
    "chown",
    "chtimes",
];

/// Login methods that can be individually denied.
pub const VALID_LOGIN_METHODS: &[&str] = &[
    "publickey",
    "password",
    "keyboard-interactive",
    "publickey+password",
    "publickey+keyboard-interactive",
];

/// Protocols that can be individually denied.
pub const VALID_PROTOCOLS: &[&str] = &["SSH", "FTP", "DAV"];

/// Additional restrictions applied to a user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserFilters {
    pub allowed_ip: Vec<String>,
    pub denied_ip: Vec<String>,
    pub denied_login_methods: Vec<String>,
    pub denied_protocols: Vec<String>,
    pub file_extensions: Vec<FilterRecord>,
    pub file_patterns: Vec<FilterRecord>,
    /// Maximum size in bytes for a single upload, 0 means unlimited.
    pub max_upload_file_size: i64,
}

/// A fully decoded user account, ready for the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Database identifier, assigned by the persistence layer.
    pub id: i64,
    pub username: String,
    /// Plaintext on add/change, hashed once persisted. Empty on update
    /// means "keep the stored password".
    pub password: String,
    pub public_keys: Vec<String>,
    pub home_dir: String,
    pub virtual_folders: Vec<VirtualFolder>,
    pub uid: i32,
    pub gid: i32,
    #[schema(value_type = Object)]
    pub permissions: PermissionTree,
    pub max_sessions: i32,
    pub quota_size: i64,
    pub quota_files: i32,
    pub upload_bandwidth: i64,
    pub download_bandwidth: i64,
    /// 1 enabled, 0 disabled.
    pub status: i32,
    /// Milliseconds since the Unix epoch; 0 means the account never
    /// expires.
    pub expiration_date: i64,
    pub filters: UserFilters,
    pub fs_config: FsConfig,
    pub additional_info: String,
}

impl User {
    /// Permission tokens granted for `path`, empty when none are set.
    pub fn permissions_for_path(&self, path: &str) -> &[String] {
        self.permissions.get(path).map_or(&[], Vec::as_slice)
    }

    /// Replace stored secrets with redaction markers before the account
    /// is handed to the rendering layer.
    pub fn hide_secrets(&mut self) {
        self.fs_config.hide_secrets();
    }
}
