//! Board-agnostic logic for the moOde now-playing display
//!
//! This crate contains everything between the network stack and the panel
//! that does not depend on specific hardware:
//!
//! - Network abstraction traits (connector, connection)
//! - Status fetcher with a bounded read loop
//! - Display power state machine
//! - Display controller deciding what to draw each poll tick
//! - Configuration types and timing constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod fetch;
pub mod state;
pub mod traits;

pub use controller::DisplayStateMachine;
pub use fetch::{FetchError, StatusFetcher};
