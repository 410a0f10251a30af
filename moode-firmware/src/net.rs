//! Wi-Fi association and the TCP connector
//!
//! The CYW43 firmware and CLM blobs are not linked into the image; they are
//! flashed once at fixed addresses (see memory.x) and read in place.

use cyw43::JoinOptions;
use defmt::*;
use embassy_net::tcp::{self, TcpSocket};
use embassy_net::{IpAddress, IpEndpoint, Ipv4Address, Stack};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{ErrorType, Read, Write};

use moode_core::config::{
    NetworkConfig, CLOSE_TIMEOUT_MS, IO_TIMEOUT_SECS, WIFI_JOIN_TIMEOUT_SECS,
};
use moode_core::traits::{ConnectError, Connection, Connector};

use crate::error::FatalError;

/// CYW43 firmware location in flash
const CYW43_FW_ADDR: usize = 0x1010_0000;
const CYW43_FW_LEN: usize = 230_321;

/// CYW43 country locale matrix location in flash
const CYW43_CLM_ADDR: usize = 0x1014_0000;
const CYW43_CLM_LEN: usize = 4_752;

/// Socket buffer sizes; the response is read out in 1 KiB chunks
const RX_BUF: usize = 4096;
const TX_BUF: usize = 1024;

/// CYW43 firmware blob
pub fn cyw43_firmware() -> &'static [u8] {
    flashed_blob(CYW43_FW_ADDR, CYW43_FW_LEN)
}

/// CYW43 CLM blob
pub fn cyw43_clm() -> &'static [u8] {
    flashed_blob(CYW43_CLM_ADDR, CYW43_CLM_LEN)
}

fn flashed_blob(addr: usize, len: usize) -> &'static [u8] {
    // SAFETY: XIP flash is mapped read-only for the lifetime of the program
    // and the range lies inside the 2 MiB part, above the image
    unsafe { core::slice::from_raw_parts(addr as *const u8, len) }
}

/// Join the network and wait for a DHCP lease
///
/// Association is retried until the whole window runs out.
pub async fn join(
    control: &mut cyw43::Control<'_>,
    stack: Stack<'_>,
    config: &NetworkConfig<'_>,
) -> Result<(), FatalError> {
    info!("Joining Wi-Fi network '{}'", config.ssid);

    let connect = async {
        loop {
            let options = if config.is_open() {
                JoinOptions::new_open()
            } else {
                JoinOptions::new(config.password.as_bytes())
            };

            match control.join(config.ssid, options).await {
                Ok(()) => break,
                Err(e) => warn!("Wi-Fi join failed with status={}", e.status),
            }
        }

        info!("Wi-Fi associated, waiting for DHCP");
        stack.wait_link_up().await;
        stack.wait_config_up().await;
    };

    with_timeout(Duration::from_secs(WIFI_JOIN_TIMEOUT_SECS), connect)
        .await
        .map_err(|_| FatalError::WifiTimeout)?;

    if let Some(v4) = stack.config_v4() {
        info!("Wi-Fi connected, IP {}", v4.address);
    }
    Ok(())
}

/// Opens TCP connections on the embassy-net stack
///
/// Owns the socket buffers; one connection at a time borrows them.
pub struct TcpConnector<'s> {
    stack: Stack<'s>,
    rx: [u8; RX_BUF],
    tx: [u8; TX_BUF],
}

impl<'s> TcpConnector<'s> {
    pub fn new(stack: Stack<'s>) -> Self {
        Self {
            stack,
            rx: [0; RX_BUF],
            tx: [0; TX_BUF],
        }
    }
}

impl<'s> Connector for TcpConnector<'s> {
    type Connection<'a>
        = TcpConnection<'a>
    where
        Self: 'a;

    async fn connect(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<TcpConnection<'_>, ConnectError> {
        let addr: Ipv4Address = host.parse().map_err(|_| ConnectError::InvalidAddress)?;
        let endpoint = IpEndpoint::new(IpAddress::Ipv4(addr), port);
        let timeout = Duration::from_secs(IO_TIMEOUT_SECS);

        let mut socket = TcpSocket::new(self.stack, &mut self.rx, &mut self.tx);
        socket.set_timeout(Some(timeout));

        let connected = with_timeout(timeout, socket.connect(endpoint)).await;
        match connected {
            Ok(Ok(())) => Ok(TcpConnection { socket }),
            Ok(Err(e)) => {
                socket.abort();
                Err(match e {
                    tcp::ConnectError::TimedOut => ConnectError::Timeout,
                    tcp::ConnectError::NoRoute => ConnectError::NoRoute,
                    _ => ConnectError::Refused,
                })
            }
            Err(_) => {
                socket.abort();
                Err(ConnectError::Timeout)
            }
        }
    }
}

/// One open TCP connection
pub struct TcpConnection<'a> {
    socket: TcpSocket<'a>,
}

impl ErrorType for TcpConnection<'_> {
    type Error = tcp::Error;
}

impl Read for TcpConnection<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, tcp::Error> {
        self.socket.read(buf).await
    }
}

impl Write for TcpConnection<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, tcp::Error> {
        self.socket.write(buf).await
    }

    async fn flush(&mut self) -> Result<(), tcp::Error> {
        self.socket.flush().await
    }
}

impl Connection for TcpConnection<'_> {
    async fn close(&mut self) {
        self.socket.close();
        // The response is already read; give the FIN a short chance to go
        // out, then drop state
        let _ = with_timeout(Duration::from_millis(CLOSE_TIMEOUT_MS), self.socket.flush()).await;
        self.socket.abort();
    }
}
