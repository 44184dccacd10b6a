//! Mapping from the pixel position in a stream to the physical chip channel.

/// Channel assignment strategy.
pub trait ChannelMap {
    /// Returns the chip channel for the pixel at the given position.
    ///
    /// `None` means that the position is not wired to any channel.
    fn channel(&self, position: usize) -> Option<usize>;
}

impl<F> ChannelMap for F
where
    F: Fn(usize) -> Option<usize>,
{
    fn channel(&self, position: usize) -> Option<usize> {
        self(position)
    }
}

/// The Nth pixel drives the Nth channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sequential;

impl ChannelMap for Sequential {
    fn channel(&self, position: usize) -> Option<usize> {
        Some(position)
    }
}

/// Skips the given number of leading channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset(pub usize);

impl ChannelMap for Offset {
    fn channel(&self, position: usize) -> Option<usize> {
        position.checked_add(self.0)
    }
}

/// The first pixel drives the last of the given number of channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reversed(pub usize);

impl ChannelMap for Reversed {
    fn channel(&self, position: usize) -> Option<usize> {
        self.0.checked_sub(position.checked_add(1)?)
    }
}

/// Explicit wiring table, the entry at index N is the channel of the Nth pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table<T>(pub T);

impl<T: AsRef<[usize]>> ChannelMap for Table<T> {
    fn channel(&self, position: usize) -> Option<usize> {
        self.0.as_ref().get(position).copied()
    }
}
