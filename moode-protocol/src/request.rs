//! Status request encoding
//!
//! The display only ever issues one request: a `GET` for moOde's current
//! song command, asking the server to close the connection afterwards.

use core::fmt::Write;

use heapless::String;

/// Path and query of the moOde current-song command
pub const STATUS_PATH: &str = "/command/?cmd=get_currentsong";

/// Maximum encoded request size
///
/// Fixed text is ~80 bytes, leaving room for any realistic host name.
pub const REQUEST_CAPACITY: usize = 192;

/// Errors that can occur while building the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Host does not fit in the request buffer
    HostTooLong,
    /// Host is empty or contains CR/LF
    InvalidHost,
}

impl RequestError {
    /// Short human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestError::HostTooLong => "Host name too long",
            RequestError::InvalidHost => "Invalid host name",
        }
    }
}

/// Build the `get_currentsong` request for `host`
///
/// Produces:
/// ```text
/// GET /command/?cmd=get_currentsong HTTP/1.1\r\n
/// Host: <host>\r\n
/// Connection: close\r\n
/// \r\n
/// ```
pub fn status_request(host: &str) -> Result<String<REQUEST_CAPACITY>, RequestError> {
    if host.is_empty() || host.contains(['\r', '\n']) {
        return Err(RequestError::InvalidHost);
    }

    let mut request = String::new();
    write!(
        request,
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        STATUS_PATH, host
    )
    .map_err(|_| RequestError::HostTooLong)?;

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_exact_bytes() {
        let request = status_request("192.168.1.20").unwrap();
        assert_eq!(
            request.as_str(),
            "GET /command/?cmd=get_currentsong HTTP/1.1\r\n\
             Host: 192.168.1.20\r\n\
             Connection: close\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_request_ends_with_blank_line() {
        let request = status_request("moode.local").unwrap();
        assert!(request.ends_with("\r\n\r\n"));
        assert_eq!(request.matches("\r\n\r\n").count(), 1);
    }

    #[test]
    fn test_request_rejects_header_injection() {
        assert_eq!(
            status_request("moode\r\nX-Evil: 1"),
            Err(RequestError::InvalidHost)
        );
        assert_eq!(status_request(""), Err(RequestError::InvalidHost));
    }

    #[test]
    fn test_request_host_too_long() {
        let host = "h".repeat(REQUEST_CAPACITY);
        assert_eq!(status_request(&host), Err(RequestError::HostTooLong));
    }
}
