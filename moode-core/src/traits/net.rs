//! TCP connector traits
//!
//! A [`Connector`] opens one short-lived [`Connection`] per fetch. Timeouts
//! are the implementation's job: `connect` and every `read` must give up
//! after [`IO_TIMEOUT_SECS`](crate::config::IO_TIMEOUT_SECS).

use embedded_io_async::{Read, Write};

/// Errors that can occur while opening a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// Host is not a usable address
    InvalidAddress,
    /// No connection within the timeout
    Timeout,
    /// Peer refused or reset the connection
    Refused,
    /// Network interface is down
    NoRoute,
}

impl ConnectError {
    /// Short human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectError::InvalidAddress => "Invalid host",
            ConnectError::Timeout => "Connect timeout",
            ConnectError::Refused => "Connection refused",
            ConnectError::NoRoute => "Network down",
        }
    }
}

/// An open byte stream to the peer
#[allow(async_fn_in_trait)]
pub trait Connection: Read + Write {
    /// Shut the connection down and release it
    ///
    /// Must not fail; errors while closing are swallowed.
    async fn close(&mut self);
}

/// Opens connections to a host
#[allow(async_fn_in_trait)]
pub trait Connector {
    /// Connection type, which may borrow buffers owned by the connector
    type Connection<'a>: Connection
    where
        Self: 'a;

    /// Connect to `host:port`
    async fn connect(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<Self::Connection<'_>, ConnectError>;
}
