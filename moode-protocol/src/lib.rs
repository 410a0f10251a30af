//! moOde status protocol
//!
//! This crate covers the single HTTP exchange between the display and the
//! moOde player: building the fixed `get_currentsong` request and turning the
//! raw bytes read back from the socket into a [`SongStatus`].
//!
//! # Exchange Overview
//!
//! ```text
//! GET /command/?cmd=get_currentsong HTTP/1.1
//! Host: <moode host>
//! Connection: close
//!
//! HTTP/1.1 200 OK          ┐
//! Transfer-Encoding: ...   │ header block
//!                          ┘ blank line
//! 1a4                      ┐
//! {"state":"play",...}     │ chunked body: size markers and one
//! 0                        ┘ single-line JSON object
//! ```
//!
//! The response parser is deliberately narrow: it does not reassemble chunk
//! data, it picks the first body line that is a complete JSON object.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod chunked;
pub mod request;
pub mod response;
pub mod status;

pub use chunked::{extract_json_line, is_chunk_size_marker};
pub use request::{status_request, RequestError, STATUS_PATH};
pub use response::{parse_status_response, split_envelope, ResponseError, RESPONSE_BUDGET};
pub use status::{PlaybackState, SongStatus};
