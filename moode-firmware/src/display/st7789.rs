//! ST7789 TFT Display Driver
//!
//! Driver for the 320x240 ST7789 panel on the Pico Display Pack 2.8"
//! over write-only SPI. Pixels are RGB565, sent big-endian.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Display dimensions (landscape)
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;

/// ST7789 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const TEON: u8 = 0x35;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const PORCTRL: u8 = 0xB2;
    pub const GCTRL: u8 = 0xB7;
    pub const VCOMS: u8 = 0xBB;
    pub const LCMCTRL: u8 = 0xC0;
    pub const VDVVRHEN: u8 = 0xC2;
    pub const VRHS: u8 = 0xC3;
    pub const VDVS: u8 = 0xC4;
    pub const FRCTRL2: u8 = 0xC6;
    pub const PWCTRL1: u8 = 0xD0;
    pub const PVGAMCTRL: u8 = 0xE0;
    pub const NVGAMCTRL: u8 = 0xE1;
}

/// MADCTL for landscape: row/column exchange, column order reversed
const MADCTL_LANDSCAPE: u8 = 0x70;

/// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x05;

/// Bus errors from the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// SPI transfer failed
    Spi,
    /// DC or CS pin could not be driven
    Pin,
}

/// ST7789 driver
pub struct St7789<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> St7789<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new ST7789 driver
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Initialize the panel
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), PanelError> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);

        self.command(cmd::TEON, &[])?;
        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        self.command(cmd::PORCTRL, &[0x0C, 0x0C, 0x00, 0x33, 0x33])?;
        self.command(cmd::LCMCTRL, &[0x2C])?;
        self.command(cmd::VDVVRHEN, &[0x01])?;
        self.command(cmd::VRHS, &[0x12])?;
        self.command(cmd::VDVS, &[0x20])?;
        self.command(cmd::PWCTRL1, &[0xA4, 0xA1])?;
        self.command(cmd::FRCTRL2, &[0x0F])?;

        // Voltages and gamma for the 320x240 glass
        self.command(cmd::GCTRL, &[0x35])?;
        self.command(cmd::VCOMS, &[0x1F])?;
        self.command(
            cmd::PVGAMCTRL,
            &[
                0xD0, 0x08, 0x11, 0x08, 0x0C, 0x15, 0x39, 0x33, 0x50, 0x36, 0x13, 0x14, 0x29,
                0x2D,
            ],
        )?;
        self.command(
            cmd::NVGAMCTRL,
            &[
                0xD0, 0x08, 0x10, 0x08, 0x06, 0x06, 0x39, 0x44, 0x51, 0x0B, 0x16, 0x14, 0x2F,
                0x31,
            ],
        )?;

        // Panel is wired inverted
        self.command(cmd::INVON, &[])?;
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::NORON, &[])?;
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(100);

        self.command(cmd::MADCTL, &[MADCTL_LANDSCAPE])?;
        self.set_window()
    }

    /// Send a full frame of big-endian RGB565 pixels
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), PanelError> {
        self.set_window()?;
        self.command(cmd::RAMWR, frame)
    }

    /// Address the whole panel
    fn set_window(&mut self) -> Result<(), PanelError> {
        let [xh, xl] = ((WIDTH - 1) as u16).to_be_bytes();
        let [yh, yl] = ((HEIGHT - 1) as u16).to_be_bytes();
        self.command(cmd::CASET, &[0, 0, xh, xl])?;
        self.command(cmd::RASET, &[0, 0, yh, yl])
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        let result = self.transfer(command, params);
        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }

    fn transfer(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Pin)?;
        self.spi.write(&[command]).map_err(|_| PanelError::Spi)?;
        self.spi.flush().map_err(|_| PanelError::Spi)?;

        if !params.is_empty() {
            self.dc.set_high().map_err(|_| PanelError::Pin)?;
            self.spi.write(params).map_err(|_| PanelError::Spi)?;
            self.spi.flush().map_err(|_| PanelError::Spi)?;
        }

        Ok(())
    }
}
