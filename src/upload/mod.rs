//! Upload Decoder
//!
//! Converts an uploaded file's encoded payload into a [`Table`](crate::table::Table).
//!
//! ```text
//!   "<content-type>,<base64>" → split → base64 decode → UTF-8 → CSV → Table
//! ```
//!
//! Each stage has its own error variant (see [`UploadError`]). Callers in the
//! dashboard treat every failure as "no table produced".

mod decoder;
mod error;

pub use decoder::{decode_upload, parse_csv, UploadedPayload, CSV_CONTENT_TYPE};
pub use error::{UploadError, UploadResult};
