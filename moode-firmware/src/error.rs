//! Fatal errors
//!
//! Anything here stops the poll loop; it is shown on the error screen and
//! the device waits for a power cycle.

use moode_display::DisplayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalError {
    /// Panel bring-up failed
    PanelInit,
    /// No association and lease within the join window
    WifiTimeout,
    /// Drawing failed
    Display(DisplayError),
}

impl FatalError {
    /// Short human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            FatalError::PanelInit => "Display init failed",
            FatalError::WifiTimeout => "WiFi connection timed out",
            FatalError::Display(e) => e.as_str(),
        }
    }
}

impl From<DisplayError> for FatalError {
    fn from(e: DisplayError) -> Self {
        FatalError::Display(e)
    }
}
