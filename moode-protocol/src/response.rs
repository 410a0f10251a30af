//! HTTP response parsing
//!
//! Turns the bytes accumulated from the socket into a [`SongStatus`]:
//!
//! 1. decode as UTF-8
//! 2. split header block and body on the first blank line
//! 3. require `200 OK` in the header block
//! 4. pull the JSON line out of the chunked body
//! 5. parse it against the status schema
//!
//! No redirects, no retries, no header parsing beyond the status token.

use alloc::string::String;
use alloc::vec::Vec;

use crate::chunked::extract_json_line;
use crate::status::SongStatus;

/// Maximum number of response bytes read from the socket
///
/// 8KB is plenty for song metadata and bounds peak heap use.
pub const RESPONSE_BUDGET: usize = 8192;

/// Header/body delimiter
const BLANK_LINE: &str = "\r\n\r\n";

/// Success token searched for in the header block
const STATUS_OK: &str = "200 OK";

/// Errors that can occur while parsing a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Response bytes are not valid UTF-8
    InvalidUtf8,
    /// No blank line separating headers from body
    Malformed,
    /// Status line is not `200 OK`
    Status,
    /// Body holds no single-line JSON object
    MissingPayload,
    /// JSON payload does not match the status schema
    Json,
}

impl ResponseError {
    /// Short human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseError::InvalidUtf8 => "Invalid UTF-8",
            ResponseError::Malformed => "Invalid HTTP response",
            ResponseError::Status => "HTTP error status",
            ResponseError::MissingPayload => "No JSON in response",
            ResponseError::Json => "Bad JSON payload",
        }
    }
}

/// Split a response into header block and body on the first blank line
pub fn split_envelope(response: &str) -> Option<(&str, &str)> {
    response.split_once(BLANK_LINE)
}

/// Parse a raw status response
///
/// Takes ownership of the buffer so it is released as soon as parsing is
/// done, before the caller allocates anything else.
pub fn parse_status_response(raw: Vec<u8>) -> Result<SongStatus, ResponseError> {
    let text = String::from_utf8(raw).map_err(|_| ResponseError::InvalidUtf8)?;
    parse_status_text(&text)
}

fn parse_status_text(text: &str) -> Result<SongStatus, ResponseError> {
    let (headers, body) = split_envelope(text).ok_or(ResponseError::Malformed)?;

    if !headers.contains(STATUS_OK) {
        return Err(ResponseError::Status);
    }

    let json = extract_json_line(body).ok_or(ResponseError::MissingPayload)?;
    SongStatus::from_json(json).map_err(|_| ResponseError::Json)
}
