//! Upload decoder error types

use thiserror::Error;

/// Errors that can occur while decoding an uploaded file
#[derive(Error, Debug)]
pub enum UploadError {
    /// Payload is not `<content-type>,<base64 data>`
    #[error("Malformed payload: expected '<content-type>,<base64 data>'")]
    MalformedPayload,

    /// Data segment is not valid base64
    #[error("Decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Text is not well-formed CSV
    #[error("Parse error: {0}")]
    Parse(String),
}

impl UploadError {
    /// Stable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::MalformedPayload => "MALFORMED_PAYLOAD",
            UploadError::Decode(_) => "DECODE_ERROR",
            UploadError::Encoding(_) => "ENCODING_ERROR",
            UploadError::Parse(_) => "PARSE_ERROR",
        }
    }
}

impl From<csv::Error> for UploadError {
    fn from(err: csv::Error) -> Self {
        UploadError::Parse(err.to_string())
    }
}

impl From<crate::table::TableError> for UploadError {
    fn from(err: crate::table::TableError) -> Self {
        UploadError::Parse(err.to_string())
    }
}

/// Result type alias for upload decoding
pub type UploadResult<T> = Result<T, UploadError>;
