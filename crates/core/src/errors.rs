use core::fmt::Debug;

use displaydoc::Display;

/// A specialized result type for the LED output adapters.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while driving LED outputs.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// Invalid controller configuration: {0}
    Configuration(ConfigurationError),
    /// Channel {channel} is out of range, the segment has only {capacity} channels.
    ChannelOverrun { channel: usize, capacity: usize },
    /// The controller has not been initialized yet.
    NotInitialized,
    /// The output hardware reported an error.
    Output,
}

/// Misconfigured wiring detected while constructing a controller or a chip session.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum ConfigurationError {
    /// pin {0} is assigned to more than one output line
    DuplicatePin(u8),
    /// pin {0} cannot be driven by this output
    UnknownPin(u8),
    /// the segment must contain at least one channel
    EmptySegment,
    /// the segment capacity {capacity} exceeds the maximum of {max} channels
    SegmentTooLarge { capacity: usize, max: usize },
    /// the segment capacity {capacity} is not a multiple of {chip_channels} chip channels
    SegmentSizeMismatch {
        capacity: usize,
        chip_channels: usize,
    },
    /// the segment is already owned by another session
    SegmentInUse,
}

impl Error {
    /// Creates a new output hardware error.
    ///
    /// `embedded-hal` errors only promise `Debug`, so the source error is logged here
    /// instead of being carried along.
    pub fn output<E>(err: E) -> Self
    where
        E: Debug,
    {
        log::error!("Output hardware error: {:?}", err);
        Self::Output
    }
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigurationError {}
