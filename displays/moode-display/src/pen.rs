//! Pen colours
//!
//! Colours are kept as 8-bit RGB; backends convert to their native format.

/// An RGB drawing colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pen {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pen {
    pub const BLACK: Pen = Pen::rgb(0, 0, 0);
    pub const WHITE: Pen = Pen::rgb(255, 255, 255);
    pub const GREEN: Pen = Pen::rgb(0, 255, 0);
    pub const BLUE: Pen = Pen::rgb(0, 150, 255);
    pub const ORANGE: Pen = Pen::rgb(255, 165, 0);
    pub const RED: Pen = Pen::rgb(255, 50, 50);
    pub const CYAN: Pen = Pen::rgb(0, 255, 255);
    pub const YELLOW: Pen = Pen::rgb(255, 255, 0);
    pub const LIME: Pen = Pen::rgb(50, 255, 50);

    /// Create a pen from 8-bit RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to packed RGB565
    pub const fn to_rgb565(self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_packing() {
        assert_eq!(Pen::BLACK.to_rgb565(), 0x0000);
        assert_eq!(Pen::WHITE.to_rgb565(), 0xFFFF);
        assert_eq!(Pen::rgb(255, 0, 0).to_rgb565(), 0xF800);
        assert_eq!(Pen::GREEN.to_rgb565(), 0x07E0);
        assert_eq!(Pen::rgb(0, 0, 255).to_rgb565(), 0x001F);
    }
}
