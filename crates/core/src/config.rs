//! Construction-time wiring of the controllers.

use core::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// The maximum number of chip channels in a single segment (eight chained 24-channel chips).
pub const MAX_SEGMENT_CHANNELS: usize = 192;

/// Logical number of an output line or a board pin.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(pub u8);

impl Display for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

impl From<u8> for Pin {
    fn from(inner: u8) -> Self {
        Self(inner)
    }
}

/// Output lines of a single tri-color fixture.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriColorPins {
    pub red: Pin,
    pub green: Pin,
    pub blue: Pin,
}

impl TriColorPins {
    pub const fn new(red: Pin, green: Pin, blue: Pin) -> Self {
        Self { red, green, blue }
    }

    /// Returns pins in the channel order: red, green, blue.
    pub const fn as_array(&self) -> [Pin; 3] {
        [self.red, self.green, self.blue]
    }

    /// Checks that every color has its own output line.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_distinct(&self.as_array())
    }
}

/// Parameters of a chained driver-chip segment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Total number of PWM channels in the segment.
    pub capacity: usize,
    pub clock: Pin,
    pub data: Pin,
    pub latch: Pin,
}

impl SegmentConfig {
    pub const fn new(capacity: usize, clock: Pin, data: Pin, latch: Pin) -> Self {
        Self {
            capacity,
            clock,
            data,
            latch,
        }
    }

    /// Checks the segment capacity boundaries and the serial lines wiring.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.capacity == 0 {
            return Err(ConfigurationError::EmptySegment);
        }
        if self.capacity > MAX_SEGMENT_CHANNELS {
            return Err(ConfigurationError::SegmentTooLarge {
                capacity: self.capacity,
                max: MAX_SEGMENT_CHANNELS,
            });
        }
        ensure_distinct(&[self.clock, self.data, self.latch])
    }
}

fn ensure_distinct(pins: &[Pin]) -> Result<(), ConfigurationError> {
    for (i, pin) in pins.iter().enumerate() {
        if pins[i + 1..].contains(pin) {
            return Err(ConfigurationError::DuplicatePin(pin.0));
        }
    }
    Ok(())
}
