//! Bit-banged TLC5947 24-channel 12-bit PWM driver.
//!
//! Chips are chained through their serial outputs, the whole chain shares clock, data and
//! latch lines. The shift register of the last chip in the chain is loaded first.

use amiacs_core::{
    ChipClient, ChipSession, ConfigurationError, Error, Result, SegmentConfig,
    MAX_SEGMENT_CHANNELS,
};
use embedded_hal::digital::OutputPin;

/// Number of PWM channels of a single chip.
pub const TLC5947_CHANNELS: usize = 24;
/// Bits per channel level.
const LEVEL_BITS: u8 = 12;

/// TLC5947 client owning the serial lines until a session is opened.
#[derive(Debug)]
pub struct Tlc5947Client<CLK, DAT, LAT> {
    pins: Option<(CLK, DAT, LAT)>,
}

impl<CLK, DAT, LAT> Tlc5947Client<CLK, DAT, LAT>
where
    CLK: OutputPin,
    DAT: OutputPin,
    LAT: OutputPin,
{
    pub fn new(clock: CLK, data: DAT, latch: LAT) -> Self {
        Self {
            pins: Some((clock, data, latch)),
        }
    }
}

impl<CLK, DAT, LAT> ChipClient for Tlc5947Client<CLK, DAT, LAT>
where
    CLK: OutputPin,
    DAT: OutputPin,
    LAT: OutputPin,
{
    type Session = Tlc5947<CLK, DAT, LAT>;

    fn open(&mut self, config: &SegmentConfig) -> Result<Self::Session> {
        config.validate()?;
        // The lines are handed over only once nothing else can fail.
        let levels = shadow_registers(config.capacity)?;
        let (clock, data, latch) = self.pins.take().ok_or(ConfigurationError::SegmentInUse)?;

        log::debug!(
            "Opened TLC5947 segment of {} chips",
            config.capacity / TLC5947_CHANNELS
        );
        Ok(Tlc5947 {
            clock,
            data,
            latch,
            levels,
        })
    }
}

/// TLC5947 session with the shadow copy of the grayscale registers.
#[derive(Debug)]
pub struct Tlc5947<CLK, DAT, LAT> {
    clock: CLK,
    data: DAT,
    latch: LAT,
    levels: heapless::Vec<u16, MAX_SEGMENT_CHANNELS>,
}

impl<CLK, DAT, LAT> Tlc5947<CLK, DAT, LAT>
where
    CLK: OutputPin,
    DAT: OutputPin,
    LAT: OutputPin,
{
    /// Creates a session for a chain with the given total number of channels.
    pub fn new(clock: CLK, data: DAT, latch: LAT, capacity: usize) -> Result<Self> {
        let levels = shadow_registers(capacity)?;
        Ok(Self {
            clock,
            data,
            latch,
            levels,
        })
    }

    /// Returns the staged channel levels.
    pub fn levels(&self) -> &[u16] {
        &self.levels
    }

    /// Releases the serial lines.
    pub fn release(self) -> (CLK, DAT, LAT) {
        (self.clock, self.data, self.latch)
    }

    fn shift_out(&mut self) -> Result<()> {
        for &level in self.levels.iter().rev() {
            for bit in (0..LEVEL_BITS).rev() {
                self.clock.set_low().map_err(Error::output)?;
                if level & (1 << bit) == 0 {
                    self.data.set_low().map_err(Error::output)?;
                } else {
                    self.data.set_high().map_err(Error::output)?;
                }
                self.clock.set_high().map_err(Error::output)?;
            }
        }
        self.clock.set_low().map_err(Error::output)
    }
}

impl<CLK, DAT, LAT> ChipSession for Tlc5947<CLK, DAT, LAT>
where
    CLK: OutputPin,
    DAT: OutputPin,
    LAT: OutputPin,
{
    const MAX_LEVEL: u16 = (1 << LEVEL_BITS) - 1;

    fn capacity(&self) -> usize {
        self.levels.len()
    }

    fn begin(&mut self) -> Result<()> {
        self.latch.set_low().map_err(Error::output)
    }

    fn set_channel_level(&mut self, channel: usize, level: u16) -> Result<()> {
        let capacity = self.levels.len();
        let slot = self
            .levels
            .get_mut(channel)
            .ok_or(Error::ChannelOverrun { channel, capacity })?;
        *slot = level.min(Self::MAX_LEVEL);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.latch.set_low().map_err(Error::output)?;
        self.shift_out()?;
        // Latch pulse moves the shift registers into the grayscale registers.
        self.latch.set_high().map_err(Error::output)?;
        self.latch.set_low().map_err(Error::output)
    }
}

/// Zeroed shadow registers for a chain of the given total number of channels.
fn shadow_registers(capacity: usize) -> Result<heapless::Vec<u16, MAX_SEGMENT_CHANNELS>> {
    check_capacity(capacity)?;

    let mut levels = heapless::Vec::new();
    levels
        .resize(capacity, 0)
        .map_err(|()| ConfigurationError::SegmentTooLarge {
            capacity,
            max: MAX_SEGMENT_CHANNELS,
        })?;
    Ok(levels)
}

fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(ConfigurationError::EmptySegment.into());
    }
    if capacity > MAX_SEGMENT_CHANNELS {
        return Err(ConfigurationError::SegmentTooLarge {
            capacity,
            max: MAX_SEGMENT_CHANNELS,
        }
        .into());
    }
    if capacity % TLC5947_CHANNELS != 0 {
        return Err(ConfigurationError::SegmentSizeMismatch {
            capacity,
            chip_channels: TLC5947_CHANNELS,
        }
        .into());
    }
    Ok(())
}
