//! Panel backend
//!
//! Implements [`DisplayBackend`] on top of the frame buffer, the ST7789
//! driver and a PWM backlight.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal::spi::SpiBus;
use moode_display::{DisplayBackend, DisplayError, Pen};

use super::framebuffer::{FrameBuffer, Scaled};
use super::st7789::{St7789, HEIGHT, WIDTH};

/// Backlight duty resolution
const DUTY_STEPS: u16 = 1000;

/// Pico Display Pack 2.8" backend
pub struct PanelDisplay<SPI, DC, CS, BL> {
    panel: St7789<SPI, DC, CS>,
    frame: FrameBuffer,
    backlight: BL,
    pen: Pen,
}

impl<SPI, DC, CS, BL> PanelDisplay<SPI, DC, CS, BL>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    BL: SetDutyCycle,
{
    /// Wrap an initialized panel
    pub fn new(panel: St7789<SPI, DC, CS>, frame: FrameBuffer, backlight: BL) -> Self {
        Self {
            panel,
            frame,
            backlight,
            pen: Pen::WHITE,
        }
    }
}

fn to_rgb565(pen: Pen) -> Rgb565 {
    Rgb565::from(RawU16::new(pen.to_rgb565()))
}

impl<SPI, DC, CS, BL> DisplayBackend for PanelDisplay<SPI, DC, CS, BL>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    BL: SetDutyCycle,
{
    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.fill(self.pen.to_rgb565());
        Ok(())
    }

    fn text(&mut self, text: &str, x: i32, y: i32, scale: u8) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X10, to_rgb565(self.pen));
        let mut scaled = Scaled::new(&mut self.frame, Point::new(x, y), scale);

        // Glyphs outside ASCII render as '?'
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(&mut scaled)
            .map_err(|never| match never {})?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        self.panel
            .write_frame(self.frame.as_bytes())
            .map_err(|_| DisplayError::Communication)
    }

    fn set_backlight(&mut self, level: f32) -> Result<(), DisplayError> {
        let duty = (level.clamp(0.0, 1.0) * f32::from(DUTY_STEPS)) as u16;
        self.backlight
            .set_duty_cycle_fraction(duty, DUTY_STEPS)
            .map_err(|_| DisplayError::Backlight)
    }

    fn dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }
}
