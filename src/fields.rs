//! Raw submitted form data, the request-scoped input to every decoder.

use indexmap::IndexMap;

/// One uploaded binary attachment, read to completion by the transport
/// layer before decoding starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    field: String,
    content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(field: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        UploadedFile {
            field: field.into(),
            content: content.into(),
        }
    }

    /// The form field the file was submitted under.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A multi-valued field-name-to-values mapping plus at most one binary
/// attachment. Built by the transport layer, immutable once handed to a
/// decoder, and dropped when the decode call returns.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: IndexMap<String, Vec<String>>,
    attachment: Option<UploadedFile>,
}

impl FormData {
    pub fn new() -> Self {
        FormData::default()
    }

    /// Append one value for `field`, keeping any values already
    /// submitted under the same name.
    pub fn push_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(value.into());
    }

    /// Attach the uploaded file. A form carries at most one.
    pub fn set_attachment(&mut self, file: UploadedFile) {
        self.attachment = Some(file);
    }

    /// The first submitted value for `field`, or the empty string when
    /// the field is absent.
    pub fn value(&self, field: &str) -> &str {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .map_or("", String::as_str)
    }

    /// Every submitted value for `field`, in submission order.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// The uploaded file, if one was submitted under `field`.
    pub fn attachment(&self, field: &str) -> Option<&UploadedFile> {
        self.attachment.as_ref().filter(|file| file.field() == field)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (field, value) in iter {
            form.push_value(field, value);
        }
        form
    }
}
