//! PWM backlight on GP20

use core::convert::Infallible;

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

/// PWM top value; 125 MHz / 32768 is about 3.8 kHz, above visible flicker
const PWM_TOP: u16 = 0x8000;

/// Backlight driven from PWM channel A
pub struct Backlight {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl Backlight {
    /// Take the slice, starting dark
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.top = PWM_TOP;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl ErrorType for Backlight {
    type Error = Infallible;
}

impl SetDutyCycle for Backlight {
    fn max_duty_cycle(&self) -> u16 {
        self.config.top
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.config.compare_a = duty;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
