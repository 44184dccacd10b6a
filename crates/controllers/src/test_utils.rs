//! Test helpers

use std::collections::BTreeMap;

use amiacs_core::{
    AnalogOutput, ChipClient, ChipSession, ConfigurationError, Error, Pin, Result, SegmentConfig,
};

/// A call made to the [`RecordingAnalogOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogEvent {
    Configure(Pin),
    Write(Pin, u8),
}

/// In-memory analog output that records every call.
#[derive(Debug, Default)]
pub struct RecordingAnalogOutput {
    /// Pins that can be driven, any pin if empty.
    pins: Vec<Pin>,
    events: Vec<AnalogEvent>,
    levels: BTreeMap<Pin, u8>,
}

impl RecordingAnalogOutput {
    /// Creates an output that can only drive the given pins.
    pub fn with_pins(pins: impl IntoIterator<Item = Pin>) -> Self {
        Self {
            pins: pins.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[AnalogEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Returns the last level written to the pin.
    pub fn level(&self, pin: Pin) -> Option<u8> {
        self.levels.get(&pin).copied()
    }
}

impl AnalogOutput for RecordingAnalogOutput {
    fn is_valid_pin(&self, pin: Pin) -> bool {
        self.pins.is_empty() || self.pins.contains(&pin)
    }

    fn configure_as_output(&mut self, pin: Pin) -> Result<()> {
        self.events.push(AnalogEvent::Configure(pin));
        Ok(())
    }

    fn write_analog_level(&mut self, pin: Pin, level: u8) -> Result<()> {
        self.events.push(AnalogEvent::Write(pin, level));
        self.levels.insert(pin, level);
        Ok(())
    }
}

/// A call made to the [`RecordingChip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipEvent {
    Begin,
    Set { channel: usize, level: u16 },
    Commit,
}

/// In-memory driver chip session.
#[derive(Debug)]
pub struct RecordingChip {
    events: Vec<ChipEvent>,
    staged: Vec<u16>,
    committed: Vec<u16>,
    failing_begins: usize,
    failing_commits: usize,
}

impl RecordingChip {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            staged: vec![0; capacity],
            committed: vec![0; capacity],
            failing_begins: 0,
            failing_commits: 0,
        }
    }

    pub fn events(&self) -> &[ChipEvent] {
        &self.events
    }

    /// Returns channel levels visible on the chip outputs.
    pub fn committed(&self) -> &[u16] {
        &self.committed
    }

    /// Returns the number of commits made so far.
    pub fn commits(&self) -> usize {
        self.events
            .iter()
            .filter(|event| **event == ChipEvent::Commit)
            .count()
    }
}

impl ChipSession for RecordingChip {
    fn capacity(&self) -> usize {
        self.staged.len()
    }

    fn begin(&mut self) -> Result<()> {
        if self.failing_begins > 0 {
            self.failing_begins -= 1;
            return Err(Error::Output);
        }
        self.events.push(ChipEvent::Begin);
        Ok(())
    }

    fn set_channel_level(&mut self, channel: usize, level: u16) -> Result<()> {
        let capacity = self.staged.len();
        let slot = self
            .staged
            .get_mut(channel)
            .ok_or(Error::ChannelOverrun { channel, capacity })?;
        *slot = level;
        self.events.push(ChipEvent::Set { channel, level });
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.failing_commits > 0 {
            self.failing_commits -= 1;
            return Err(Error::Output);
        }
        self.committed.clone_from(&self.staged);
        self.events.push(ChipEvent::Commit);
        Ok(())
    }
}

/// Client that opens [`RecordingChip`] sessions.
#[derive(Debug, Default)]
pub struct RecordingChipClient {
    opened: usize,
    exclusive: bool,
    failing_begins: usize,
    failing_commits: usize,
}

impl RecordingChipClient {
    /// Creates a client which refuses to open a second session.
    pub fn exclusive() -> Self {
        Self {
            exclusive: true,
            ..Self::default()
        }
    }

    /// Makes the first `count` `begin` calls of opened sessions fail with [`Error::Output`].
    #[must_use]
    pub fn with_failing_begins(mut self, count: usize) -> Self {
        self.failing_begins = count;
        self
    }

    /// Makes the first `count` commits of opened sessions fail with [`Error::Output`].
    #[must_use]
    pub fn with_failing_commits(mut self, count: usize) -> Self {
        self.failing_commits = count;
        self
    }

    /// Returns the number of opened sessions.
    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl ChipClient for RecordingChipClient {
    type Session = RecordingChip;

    fn open(&mut self, config: &SegmentConfig) -> Result<Self::Session> {
        if self.exclusive && self.opened > 0 {
            return Err(ConfigurationError::SegmentInUse.into());
        }
        self.opened += 1;

        let mut chip = RecordingChip::new(config.capacity);
        chip.failing_begins = core::mem::take(&mut self.failing_begins);
        chip.failing_commits = core::mem::take(&mut self.failing_commits);
        Ok(chip)
    }
}
