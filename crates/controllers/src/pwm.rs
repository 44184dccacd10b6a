//! Analog output over `embedded-hal` PWM channels.

use amiacs_core::{AnalogOutput, ConfigurationError, Error, Pin, Result};
use embedded_hal::pwm::SetDutyCycle;

/// A bank of PWM channels addressed by index, `Pin(i)` is the i-th channel.
#[derive(Debug)]
pub struct PwmBank<P, const N: usize> {
    channels: [P; N],
}

impl<P: SetDutyCycle, const N: usize> PwmBank<P, N> {
    pub fn new(channels: [P; N]) -> Self {
        Self { channels }
    }

    /// Returns back the underlying PWM channels.
    pub fn into_inner(self) -> [P; N] {
        self.channels
    }

    pub fn channel(&self, pin: Pin) -> Option<&P> {
        self.channels.get(usize::from(pin.0))
    }

    fn channel_mut(&mut self, pin: Pin) -> Result<&mut P> {
        self.channels
            .get_mut(usize::from(pin.0))
            .ok_or(Error::Configuration(ConfigurationError::UnknownPin(pin.0)))
    }
}

impl<P: SetDutyCycle, const N: usize> AnalogOutput for PwmBank<P, N> {
    fn is_valid_pin(&self, pin: Pin) -> bool {
        usize::from(pin.0) < N
    }

    fn configure_as_output(&mut self, pin: Pin) -> Result<()> {
        self.channel_mut(pin)?
            .set_duty_cycle_fully_off()
            .map_err(Error::output)
    }

    fn write_analog_level(&mut self, pin: Pin, level: u8) -> Result<()> {
        self.channel_mut(pin)?
            .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
            .map_err(Error::output)
    }
}
