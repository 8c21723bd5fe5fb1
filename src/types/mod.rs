//! The configuration aggregates handed to the persistence layer.
//!
//! Every structure here is built fresh per decode call and moved to the
//! caller; nothing is retained by the decoding layer afterwards.

mod admin;
mod folder;
mod fs;
mod user;

pub use admin::{Admin, AdminFilters, VALID_ADMIN_PERMISSIONS};
pub use folder::{BaseFolder, VirtualFolder};
pub use fs::{
    AzBlobConfig, CryptConfig, FilesystemProvider, FsConfig, GcsConfig, S3Config, SftpConfig,
};
pub use user::{
    PermissionTree, User, UserFilters, VALID_LOGIN_METHODS, VALID_PERMISSIONS, VALID_PROTOCOLS,
};
