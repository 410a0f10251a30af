//! Display abstraction and screens for the moOde now-playing display
//!
//! This crate provides:
//! - `DisplayBackend` trait covering the five primitives the screens need
//! - `Pen` colour palette
//! - `wrap_text` word wrapping used by every multi-line field
//! - Screen builders: startup, Wi-Fi, no-connection, stopped, error and the
//!   two now-playing layouts (radio stream and music file)
//!
//! # Architecture
//!
//! Screens are drawn through the trait only, so the same layout code drives
//! the ST7789 panel on the device and a recording backend in host tests.
//!
//! ## Coordinates
//!
//! Positions are in pixels on a 320x240 landscape panel, top-left origin.
//! Text is drawn with a 6-pixel-wide bitmap font magnified by `scale`, so
//! each character advances `6 * scale` pixels.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "testing"))]
extern crate alloc;

pub mod backend;
pub mod pen;
pub mod screen;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod wrap;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use pen::Pen;
pub use screen::NowPlayingLayout;
pub use wrap::{wrap_text, WrapLines};
