//! Secret envelope shared by every credential-bearing form field.
//!
//! The rendering layer never shows stored secret material: a stored
//! secret is displayed as [`REDACTED_SECRET`], and submitting that
//! marker back means "keep the stored value". This module is the single
//! code path that classifies submitted secret values, so the
//! display/submit contract stays uniform across every backend.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Marker rendered in place of a stored secret, and accepted back from
/// the form with the meaning "unchanged". Part of the wire contract
/// between decoding and rendering.
pub const REDACTED_SECRET: &str = "[**redacted**]";

/// A secret-bearing field value.
///
/// Only `Plain` carries caller-supplied plaintext, awaiting encryption
/// by the persistence layer. `Encrypted` is never produced by form
/// decoding; it only appears on records read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", content = "payload")]
pub enum Secret {
    Plain(String),
    Encrypted(String),
    /// The caller submitted the redaction marker: keep the stored value.
    Redacted,
    /// No value submitted.
    #[default]
    Empty,
}

impl Secret {
    /// Classify one submitted secret field value.
    ///
    /// A value that trims to the redaction marker is `Redacted`; a value
    /// that trims to nothing is `Empty`; anything else is `Plain`,
    /// preserving the submitted payload byte for byte.
    pub fn from_form_value(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed == REDACTED_SECRET {
            Secret::Redacted
        } else if trimmed.is_empty() {
            Secret::Empty
        } else {
            Secret::Plain(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Secret::Empty)
    }

    pub fn is_redacted(&self) -> bool {
        matches!(self, Secret::Redacted)
    }

    /// The value the rendering layer should show for this secret: the
    /// redaction marker when anything is stored, nothing otherwise.
    pub fn display_value(&self) -> &str {
        match self {
            Secret::Empty => "",
            _ => REDACTED_SECRET,
        }
    }

    /// Collapse any stored payload to `Redacted` before the owning
    /// aggregate is handed to the rendering layer.
    pub fn hide(&mut self) {
        if !self.is_empty() {
            *self = Secret::Redacted;
        }
    }

    /// Substitute the stored secret when the submitted one was redacted.
    /// Used by update merges; a non-redacted secret is left untouched.
    pub fn restore_from(&mut self, stored: &Secret) {
        if self.is_redacted() {
            *self = stored.clone();
        }
    }
}
