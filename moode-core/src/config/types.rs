//! Configuration type definitions and timing constants

/// moOde HTTP port
pub const HTTP_PORT: u16 = 80;

/// Bound on connect and on each socket read
pub const IO_TIMEOUT_SECS: u64 = 5;

/// Bound on flushing the FIN when a connection is closed
pub const CLOSE_TIMEOUT_MS: u64 = 1_000;

/// Bytes requested per socket read
pub const READ_CHUNK: usize = 1024;

/// Poll interval while the display is on
pub const ACTIVE_POLL_MS: u64 = 5_000;

/// Poll interval while the display is asleep
pub const SLEEP_POLL_MS: u64 = 15_000;

/// How long "No connection" stays up before sleeping
pub const NO_CONNECTION_DWELL_MS: u32 = 2_000;

/// How long "STOPPED" stays up before sleeping
pub const STOPPED_DWELL_MS: u32 = 3_000;

/// Hold time of the startup and Wi-Fi splash screens
pub const SPLASH_MS: u32 = 2_000;

/// Window for Wi-Fi association plus DHCP
pub const WIFI_JOIN_TIMEOUT_SECS: u64 = 20;

/// Backlight level while awake
pub const AWAKE_BRIGHTNESS: f32 = 0.8;

/// Network settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig<'a> {
    /// Wi-Fi network name
    pub ssid: &'a str,
    /// WPA2 passphrase, empty for an open network
    pub password: &'a str,
    /// moOde address as an IPv4 literal
    pub host: &'a str,
}

impl NetworkConfig<'_> {
    /// Whether the network needs a passphrase
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_polls_slower_than_active() {
        assert!(SLEEP_POLL_MS > ACTIVE_POLL_MS);
        assert!(READ_CHUNK <= moode_protocol::RESPONSE_BUDGET);
    }

    #[test]
    fn test_close_is_a_small_share_of_a_tick() {
        // Connect, reads and close all fit inside one active poll gap
        assert!(CLOSE_TIMEOUT_MS <= 1_000);
        assert!(CLOSE_TIMEOUT_MS * 5 <= ACTIVE_POLL_MS);
        assert!(CLOSE_TIMEOUT_MS < IO_TIMEOUT_SECS * 1_000);
    }

    #[test]
    fn test_open_network() {
        let config = NetworkConfig {
            ssid: "lounge",
            password: "",
            host: "192.168.1.50",
        };
        assert!(config.is_open());
    }
}
