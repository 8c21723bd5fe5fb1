//! Per-directory allow/deny filters decoded from paired form fields.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::parse::PathKeyedList;

/// Allowed and denied tokens for one directory. The same shape backs
/// both file extension filters and shell-style name pattern filters;
/// the tokens are opaque to the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub denied: Vec<String>,
}

/// Union two independently parsed path-keyed maps into one record per
/// directory.
///
/// Paths from the allowed map come first, in their submission order,
/// each picking up the denied tokens for the same path when present.
/// Paths only present in the denied map are appended after them. Every
/// path that appears in either input yields exactly one record.
pub fn merge_allow_deny(allowed: PathKeyedList, denied: PathKeyedList) -> Vec<FilterRecord> {
    let mut result: Vec<FilterRecord> = Vec::new();
    for (path, allowed_values) in allowed {
        let denied_values = denied.get(&path).cloned().unwrap_or_default();
        result.push(FilterRecord {
            path,
            allowed: allowed_values,
            denied: denied_values,
        });
    }
    for (path, denied_values) in denied {
        if result.iter().any(|record| record.path == path) {
            continue;
        }
        result.push(FilterRecord {
            path,
            allowed: Vec::new(),
            denied: denied_values,
        });
    }
    result
}
