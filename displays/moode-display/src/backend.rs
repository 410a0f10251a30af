//! Display backend trait
//!
//! Defines the interface between the screens and the panel hardware.

use crate::pen::Pen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Backlight could not be driven
    Backlight,
    /// Display not initialized
    NotInitialized,
}

impl DisplayError {
    /// Short human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayError::Communication => "Display bus error",
            DisplayError::Backlight => "Backlight error",
            DisplayError::NotInitialized => "Display not ready",
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to the panel.
/// Drawing goes into a frame that only becomes visible on [`update`].
///
/// [`update`]: DisplayBackend::update
pub trait DisplayBackend {
    /// Select the colour used by subsequent `clear` and `text` calls
    fn set_pen(&mut self, pen: Pen);

    /// Fill the whole frame with the current pen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at (`x`, `y`)
    ///
    /// - `scale`: font magnification, each glyph pixel becomes a `scale` square
    fn text(&mut self, text: &str, x: i32, y: i32, scale: u8) -> Result<(), DisplayError>;

    /// Commit the frame to the panel
    fn update(&mut self) -> Result<(), DisplayError>;

    /// Set backlight brightness
    ///
    /// - `level`: 0.0 (off) to 1.0 (full), clamped
    fn set_backlight(&mut self, level: f32) -> Result<(), DisplayError>;

    /// Get pixel dimensions as (width, height)
    fn dimensions(&self) -> (u16, u16);
}
