//! Error types for station and design-data lookups.

/// The response body could not be parsed as JSON, even after removing a
/// leading byte-order mark.
#[derive(Debug, thiserror::Error)]
#[error("JSON decoding error: {message}, response body: {}", truncate_body(.body))]
pub struct DecodeError {
    pub message: String,
    /// Raw body as received.
    pub body: String,
}

/// Any failure of a station or design-data lookup.
///
/// Malformed payloads are reported as [`FetchError::Decode`], so callers can
/// single them out with [`FetchError::is_decode`] or treat every variant the
/// same.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("received status code {status}, response body: {}", truncate_body(.body))]
    Status { status: u16, body: String },

    #[error("no stations found")]
    NoStations,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("station record is missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' is not a number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

impl FetchError {
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }

    /// HTTP status of a rejected request, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
