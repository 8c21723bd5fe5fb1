// src/lib.rs
pub use decode::{
    Rejected, WEB_DATE_TIME_FORMAT, admin_from_form, folder_from_form, fs_config_from_form,
    merge_admin_update, merge_user_update, user_from_form,
};
pub use error::{DecodeError, StoreError};
pub use fields::{FormData, UploadedFile};
pub use filters::{FilterRecord, merge_allow_deny};
pub use parse::{
    PathKeyedList, PathNormalization, clean_path, path_keyed_values, split_delimited_values,
};
pub use secret::{REDACTED_SECRET, Secret};
pub use store::{ConfigStore, MemoryStore};

mod decode;
mod error;
mod fields;
mod filters;
mod parse;
mod secret;
mod store;
pub mod types;

#[cfg(test)]
mod tests;
