//! Build-time configuration
//!
//! Values come from moode.toml via build.rs. Edit moode.toml and rebuild to
//! change them.

use moode_core::config::NetworkConfig;

pub const NETWORK: NetworkConfig<'static> = NetworkConfig {
    ssid: env!("MOODE_WIFI_SSID"),
    password: env!("MOODE_WIFI_PASSWORD"),
    host: env!("MOODE_HOST"),
};
