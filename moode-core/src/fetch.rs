//! Status fetcher
//!
//! One fetch is one short-lived connection:
//!
//! ```text
//! connect ─> send GET ─> read ≤ 8 KiB ─> close ─> parse
//! ```
//!
//! The response buffer is owned by the fetch and dropped before it returns.

use alloc::vec::Vec;

use embedded_io_async::{Read, Write};
use moode_protocol::{
    parse_status_response, status_request, RequestError, ResponseError, SongStatus,
    RESPONSE_BUDGET,
};

use crate::config::{HTTP_PORT, READ_CHUNK};
use crate::traits::{ConnectError, Connection, Connector};

/// Errors that can occur while fetching the status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Could not open the connection
    Connect(ConnectError),
    /// Request could not be built for the configured host
    Request(RequestError),
    /// Writing the request failed
    Send,
    /// Response could not be turned into a status
    Response(ResponseError),
}

impl FetchError {
    /// Short human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchError::Connect(e) => e.as_str(),
            FetchError::Request(e) => e.as_str(),
            FetchError::Send => "Send failed",
            FetchError::Response(e) => e.as_str(),
        }
    }
}

impl From<ConnectError> for FetchError {
    fn from(e: ConnectError) -> Self {
        FetchError::Connect(e)
    }
}

impl From<RequestError> for FetchError {
    fn from(e: RequestError) -> Self {
        FetchError::Request(e)
    }
}

impl From<ResponseError> for FetchError {
    fn from(e: ResponseError) -> Self {
        FetchError::Response(e)
    }
}

/// Fetches the current song status from moOde
pub struct StatusFetcher<'h, C> {
    connector: C,
    host: &'h str,
}

impl<'h, C: Connector> StatusFetcher<'h, C> {
    /// Create a fetcher for `host`
    pub fn new(connector: C, host: &'h str) -> Self {
        Self { connector, host }
    }

    /// The configured host
    pub fn host(&self) -> &str {
        self.host
    }

    /// Run one request/response exchange
    ///
    /// The connection is closed on every path once it has been opened.
    pub async fn fetch(&mut self) -> Result<SongStatus, FetchError> {
        let request = status_request(self.host)?;

        let mut connection = self.connector.connect(self.host, HTTP_PORT).await?;
        let exchanged = exchange(&mut connection, request.as_bytes()).await;
        connection.close().await;

        let raw = exchanged?;
        Ok(parse_status_response(raw)?)
    }

    /// Release the connector
    pub fn into_inner(self) -> C {
        self.connector
    }
}

/// Send the request and collect the bounded response
async fn exchange<T: Connection>(connection: &mut T, request: &[u8]) -> Result<Vec<u8>, FetchError> {
    connection
        .write_all(request)
        .await
        .map_err(|_| FetchError::Send)?;
    connection.flush().await.map_err(|_| FetchError::Send)?;

    Ok(read_bounded(connection, RESPONSE_BUDGET).await)
}

/// Read until the peer closes, a read fails, or `budget` bytes are held
///
/// Each read asks for at most [`READ_CHUNK`] bytes and never more than the
/// budget has left, so the result is never longer than `budget`. A read
/// error or timeout ends the response early; what arrived so far is kept.
pub async fn read_bounded<R: Read>(reader: &mut R, budget: usize) -> Vec<u8> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    while raw.len() < budget {
        let want = READ_CHUNK.min(budget - raw.len());
        match reader.read(&mut chunk[..want]).await {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&chunk[..n]),
        }
    }

    raw
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted peer for fetch tests

    use std::collections::VecDeque;
    use std::string::String;
    use std::vec::Vec;

    use embedded_io_async::{ErrorKind, ErrorType, Read, Write};

    use crate::traits::{ConnectError, Connection, Connector};

    /// What the peer sends, read by read
    #[derive(Default)]
    pub struct MockPeer {
        pub chunks: VecDeque<Result<Vec<u8>, ErrorKind>>,
        /// Byte repeated forever once `chunks` runs out; `None` closes
        pub endless: Option<u8>,
        pub fail_writes: bool,
        pub written: Vec<u8>,
        pub closed: bool,
        pub reads: usize,
        pub largest_read: usize,
    }

    impl MockPeer {
        pub fn sending(data: &[u8]) -> Self {
            let mut peer = Self::default();
            peer.chunks.push_back(Ok(data.to_vec()));
            peer
        }
    }

    pub struct MockConnection<'a> {
        peer: &'a mut MockPeer,
    }

    impl ErrorType for MockConnection<'_> {
        type Error = ErrorKind;
    }

    impl Read for MockConnection<'_> {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
            let peer = &mut *self.peer;
            peer.reads += 1;
            peer.largest_read = peer.largest_read.max(buf.len());

            match peer.chunks.pop_front() {
                Some(Ok(data)) => {
                    let n = buf.len().min(data.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    if n < data.len() {
                        peer.chunks.push_front(Ok(data[n..].to_vec()));
                    }
                    Ok(n)
                }
                Some(Err(e)) => Err(e),
                None => match peer.endless {
                    Some(byte) => {
                        buf.fill(byte);
                        Ok(buf.len())
                    }
                    None => Ok(0),
                },
            }
        }
    }

    impl Write for MockConnection<'_> {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
            if self.peer.fail_writes {
                return Err(ErrorKind::BrokenPipe);
            }
            self.peer.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        async fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    impl Connection for MockConnection<'_> {
        async fn close(&mut self) {
            self.peer.closed = true;
        }
    }

    #[derive(Default)]
    pub struct MockConnector {
        pub peer: MockPeer,
        pub refuse: Option<ConnectError>,
        pub connected_to: Option<(String, u16)>,
    }

    impl MockConnector {
        pub fn new(peer: MockPeer) -> Self {
            Self {
                peer,
                ..Self::default()
            }
        }
    }

    impl Connector for MockConnector {
        type Connection<'a> = MockConnection<'a>;

        async fn connect(
            &mut self,
            host: &str,
            port: u16,
        ) -> Result<MockConnection<'_>, ConnectError> {
            if let Some(e) = self.refuse {
                return Err(e);
            }
            self.connected_to = Some((host.into(), port));
            Ok(MockConnection {
                peer: &mut self.peer,
            })
        }
    }

    /// A complete chunked `200 OK` response carrying `json`
    pub fn ok_response(json: &str) -> Vec<u8> {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\n\r\n{:x}\r\n{}\r\n0\r\n\r\n",
            json.len(),
            json
        )
        .into_bytes()
    }
}
