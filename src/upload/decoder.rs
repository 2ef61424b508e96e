//! Upload decoding
//!
//! Turns `<content-type>,<base64 data>` payloads into a [`Table`].

use base64::{engine::general_purpose::STANDARD, Engine};

use super::error::{UploadError, UploadResult};
use crate::table::{Table, Value};

/// Content-type tag used when wrapping local CSV files
pub const CSV_CONTENT_TYPE: &str = "data:text/csv;base64";

/// An uploaded file as delivered by the upload control
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedPayload {
    /// Declared content type, e.g. `data:text/csv;base64`
    pub content_type: String,
    /// Base64-encoded file contents
    pub data: String,
}

impl UploadedPayload {
    /// Split a raw upload string into its two segments
    pub fn parse(raw: &str) -> UploadResult<Self> {
        let mut segments = raw.split(',');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(content_type), Some(data), None) => Ok(Self {
                content_type: content_type.to_string(),
                data: data.to_string(),
            }),
            _ => Err(UploadError::MalformedPayload),
        }
    }

    /// Wrap raw CSV bytes the way a browser upload would
    pub fn from_csv_bytes(bytes: &[u8]) -> Self {
        Self {
            content_type: CSV_CONTENT_TYPE.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// The raw upload string
    pub fn encode(&self) -> String {
        format!("{},{}", self.content_type, self.data)
    }

    /// Decode the payload into a table
    pub fn decode(&self) -> UploadResult<Table> {
        let bytes = STANDARD.decode(self.data.trim())?;
        let text = std::str::from_utf8(&bytes)?;
        parse_csv(text)
    }
}

/// Decode a raw upload string into a table
pub fn decode_upload(raw: &str) -> UploadResult<Table> {
    let payload = UploadedPayload::parse(raw)?;
    tracing::debug!(
        content_type = %payload.content_type,
        encoded_len = payload.data.len(),
        "Decoding upload"
    );
    payload.decode()
}

/// Parse CSV text with the first line as header
///
/// Cells are kept as their literal text; empty cells become null.
pub fn parse_csv(text: &str) -> UploadResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(UploadError::Parse(
            "No columns to parse from file".to_string(),
        ));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(Value::from_csv_field).collect());
    }

    let table = Table::from_records(headers.iter(), records)?;

    tracing::debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        "Parsed CSV upload"
    );

    Ok(table)
}
