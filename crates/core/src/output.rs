//! Output sinks the controllers write to.

use crate::{Pin, Result, SegmentConfig};

/// Raw analog write primitives of the board.
pub trait AnalogOutput {
    /// Returns true if the pin can be driven by this output.
    fn is_valid_pin(&self, _pin: Pin) -> bool {
        true
    }

    /// Configures the pin as an output line.
    fn configure_as_output(&mut self, pin: Pin) -> Result<()>;

    /// Writes a pulse-width analog level to the pin.
    fn write_analog_level(&mut self, pin: Pin, level: u8) -> Result<()>;
}

impl<T: ?Sized + AnalogOutput> AnalogOutput for &mut T {
    fn is_valid_pin(&self, pin: Pin) -> bool {
        T::is_valid_pin(self, pin)
    }

    fn configure_as_output(&mut self, pin: Pin) -> Result<()> {
        T::configure_as_output(self, pin)
    }

    fn write_analog_level(&mut self, pin: Pin, level: u8) -> Result<()> {
        T::write_analog_level(self, pin, level)
    }
}

/// Driver chip client, which opens sessions bound to a chained chip segment.
pub trait ChipClient {
    type Session: ChipSession;

    /// Opens an exclusive session to the segment described by the given config.
    fn open(&mut self, config: &SegmentConfig) -> Result<Self::Session>;
}

/// Shadow registers of a single chip segment.
///
/// Channel levels only become visible after [`ChipSession::commit`].
pub trait ChipSession {
    /// The maximum PWM level of a channel.
    const MAX_LEVEL: u16 = 4095;

    /// Returns the number of channels in the segment.
    fn capacity(&self) -> usize;

    /// Brings the chip to the state where it accepts data.
    fn begin(&mut self) -> Result<()>;

    /// Stages a new level for the given channel.
    fn set_channel_level(&mut self, channel: usize, level: u16) -> Result<()>;

    /// Sends all staged channel levels to the chip in one transaction.
    fn commit(&mut self) -> Result<()>;
}
