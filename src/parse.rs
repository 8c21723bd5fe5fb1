//! Tokenizers for the compact text encodings used by the web admin forms.
//!
//! Two grammars live here: flat delimited blocks (`a, b, c` or one token
//! per line) and path-keyed blocks, one `path::value1,value2,...` record
//! per line. Both are deliberately lenient: pieces that trim to nothing
//! and lines that do not parse are dropped without raising an error.

use indexmap::IndexMap;
use itertools::Itertools;

/// An insertion-ordered mapping from a directory path to the tokens
/// submitted for it. Ordering follows first occurrence in the form
/// field, which keeps downstream merges and round trips deterministic.
pub type PathKeyedList = IndexMap<String, Vec<String>>;

/// How the path segment of a `path::values` record is normalized before
/// it is used as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathNormalization {
    /// Keep the path as submitted, surrounding whitespace removed.
    Verbatim,
    /// Collapse `.`, `..` and repeated separators into a clean path.
    Clean,
}

/// Split `values` on `delimiter`, trim each piece and drop the pieces
/// that trim to nothing. An empty or all-whitespace blob yields an
/// empty list.
pub fn split_delimited_values(values: &str, delimiter: &str) -> Vec<String> {
    values
        .split(delimiter)
        .map(str::trim)
        .filter(|cleaned| !cleaned.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse newline-separated `path::value1,value2,...` records into an
/// ordered map.
///
/// Lines without a `::` marker or whose path trims to nothing are
/// silently discarded. Only the second `::`-segment carries values;
/// further segments are ignored. When a path recurs across lines its
/// value lists accumulate, and the final list is deduplicated keeping
/// first-occurrence order.
pub fn path_keyed_values(raw: &str, normalization: PathNormalization) -> PathKeyedList {
    let mut result = PathKeyedList::new();
    for line in split_delimited_values(raw, "\n") {
        let segments: Vec<&str> = line.split("::").collect();
        if segments.len() < 2 {
            continue;
        }
        let dir = segments[0].trim();
        if dir.is_empty() {
            continue;
        }
        let dir = match normalization {
            PathNormalization::Verbatim => dir.to_string(),
            PathNormalization::Clean => clean_path(dir),
        };
        let values = result.entry(dir).or_default();
        values.extend(split_delimited_values(segments[1], ","));
        let deduped: Vec<String> = values.drain(..).unique().collect();
        *values = deduped;
    }
    result
}

/// Lexically clean a `/`-separated path: collapse repeated separators,
/// resolve `.` and `..` segments without touching the filesystem. A
/// rooted path stays rooted and never escapes `/`; a relative path that
/// cleans to nothing becomes `.`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut cleaned: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if cleaned.last().is_some_and(|last| *last != "..") {
                    cleaned.pop();
                } else if !rooted {
                    cleaned.push("..");
                }
            }
            _ => cleaned.push(segment),
        }
    }
    let joined = cleaned.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
