//! Photo handling for report submissions.
//!
//! Uploaded images are stored inline in the report as `data:` URIs, so the
//! backing document stays self-contained and no separate file store is needed.

pub mod data_uri;

pub use data_uri::{EncodeError, ImageUpload, encode};
