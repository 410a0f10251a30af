//! Build script for moode-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates moode.toml at compile time and exports its values

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    export_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated settings from moode.toml
struct DisplayConfig {
    ssid: String,
    password: String,
    host: String,
}

/// Validate moode.toml configuration at compile time
fn validate_config() -> DisplayConfig {
    // Re-run if moode.toml changes
    println!("cargo:rerun-if-changed=moode.toml");

    let config_path = Path::new("moode.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: moode.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a moode.toml configuration file with      ║\n\
            ║  [wifi] ssid/password and [moode] host.                          ║\n\
            ║  Please create one in the moode-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read moode.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in moode.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let ssid = require_string(&config, "wifi", "ssid", &mut errors);
    let password = require_string(&config, "wifi", "password", &mut errors);
    let host = require_string(&config, "moode", "host", &mut errors);

    let fields = [
        ("[wifi] ssid", &ssid),
        ("[wifi] password", &password),
        ("[moode] host", &host),
    ];
    for (name, value) in fields {
        if value.as_deref().is_some_and(|v| v.chars().any(char::is_control)) {
            errors.push(format!("{} must not contain control characters", name));
        }
    }

    match ssid.as_deref() {
        Some("") => errors.push("[wifi] ssid must not be empty".to_string()),
        Some(s) if s.len() > 32 => {
            errors.push("[wifi] ssid is longer than 32 bytes".to_string())
        }
        _ => {}
    }

    if let Some(password) = password.as_deref() {
        // WPA2 passphrases are 8..=63 characters; empty means an open network
        if !password.is_empty() && !(8..=63).contains(&password.len()) {
            errors.push("[wifi] password must be 8-63 characters, or empty".to_string());
        }
    }

    if let Some(host) = host.as_deref() {
        if host.parse::<Ipv4Addr>().is_err() {
            errors.push(format!("[moode] host '{}' is not an IPv4 address", host));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in moode.toml                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=moode.toml validated successfully");

    DisplayConfig {
        ssid: ssid.unwrap_or_default(),
        password: password.unwrap_or_default(),
        host: host.unwrap_or_default(),
    }
}

/// Look up `[section] key` as a string, recording an error if absent
fn require_string(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return None;
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return None;
        }
    };

    match table.get(key) {
        Some(toml::Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Hand the validated values to the firmware as `env!` variables
fn export_config(config: &DisplayConfig) {
    println!("cargo:rustc-env=MOODE_WIFI_SSID={}", config.ssid);
    println!("cargo:rustc-env=MOODE_WIFI_PASSWORD={}", config.password);
    println!("cargo:rustc-env=MOODE_HOST={}", config.host);
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
