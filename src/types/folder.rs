//! Virtual folder definitions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A folder known to the persistence layer, mountable into many user
/// filesystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BaseFolder {
    /// Database identifier, assigned by the persistence layer.
    pub id: i64,
    /// The filesystem path the folder maps to.
    pub mapped_path: String,
}

/// A folder mounted into one user's virtual filesystem, with optional
/// per-mount quota overrides. `-1` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VirtualFolder {
    pub virtual_path: String,
    pub mapped_path: String,
    pub quota_files: i32,
    pub quota_size: i64,
}

impl Default for VirtualFolder {
    fn default() -> Self {
        VirtualFolder {
            virtual_path: String::new(),
            mapped_path: String::new(),
            quota_files: -1,
            quota_size: -1,
        }
    }
}
