//! Pico Display Pack 2.8" support
//!
//! ST7789 over SPI0 with a PWM backlight, drawn through a full frame buffer.

pub mod backlight;
pub mod framebuffer;
pub mod panel;
pub mod st7789;

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};

pub use backlight::Backlight;
pub use framebuffer::{FrameBuffer, FRAME_BYTES};
pub use panel::PanelDisplay;
pub use st7789::{PanelError, St7789};

/// The board's display as wired on the Pico W
pub type PicoDisplay =
    PanelDisplay<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Backlight>;
