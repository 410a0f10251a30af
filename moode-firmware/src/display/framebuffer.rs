//! RGB565 frame buffer
//!
//! Whole-panel buffer in the panel's wire order (big-endian RGB565), so a
//! flush is a single RAMWR transfer.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::st7789::{HEIGHT, WIDTH};

/// Frame size in bytes
pub const FRAME_BYTES: usize = WIDTH * HEIGHT * 2;

/// Frame buffer drawable with embedded-graphics
pub struct FrameBuffer {
    bytes: &'static mut [u8; FRAME_BYTES],
}

impl FrameBuffer {
    pub fn new(bytes: &'static mut [u8; FRAME_BYTES]) -> Self {
        Self { bytes }
    }

    /// Raw frame for the panel
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Fill with a packed RGB565 value
    pub fn fill(&mut self, rgb565: u16) {
        let [hi, lo] = rgb565.to_be_bytes();
        for pixel in self.bytes.chunks_exact_mut(2) {
            pixel[0] = hi;
            pixel[1] = lo;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(pt, color) in pixels {
            if pt.x >= 0 && pt.x < WIDTH as i32 && pt.y >= 0 && pt.y < HEIGHT as i32 {
                let idx = (pt.y as usize * WIDTH + pt.x as usize) * 2;
                let [hi, lo] = RawU16::from(color).into_inner().to_be_bytes();
                self.bytes[idx] = hi;
                self.bytes[idx + 1] = lo;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(RawU16::from(color).into_inner());
        Ok(())
    }
}

/// Magnifies everything drawn through it
///
/// Each pixel at (x, y) becomes a `scale` square at
/// `origin + (x, y) * scale` on the inner target.
pub struct Scaled<'a, T> {
    target: &'a mut T,
    origin: Point,
    scale: u32,
}

impl<'a, T> Scaled<'a, T> {
    pub fn new(target: &'a mut T, origin: Point, scale: u8) -> Self {
        Self {
            target,
            origin,
            scale: u32::from(scale.max(1)),
        }
    }
}

impl<T: OriginDimensions> OriginDimensions for Scaled<'_, T> {
    fn size(&self) -> Size {
        let inner = self.target.size();
        Size::new(inner.width / self.scale, inner.height / self.scale)
    }
}

impl<T: DrawTarget> DrawTarget for Scaled<'_, T>
where
    T: OriginDimensions,
{
    type Color = T::Color;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let scale = self.scale as i32;
        let block = Size::new(self.scale, self.scale);

        for Pixel(pt, color) in pixels {
            let top_left = self.origin + pt * scale;
            self.target.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}
