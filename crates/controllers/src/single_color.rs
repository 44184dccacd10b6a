//! Single-color LEDs multiplexed through a chained PWM driver chip.

use core::fmt::Debug;

use amiacs_core::{
    math8::map8_to, Brightness, ChipClient, ChipSession, Controller, ControllerKind,
    ControllerState, Error, Luma, PixelSource, Result, SegmentConfig,
};

use crate::{ChannelMap, Sequential};

/// What to do with pixels that do not fit into the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrunPolicy {
    /// Fail the frame with [`Error::ChannelOverrun`] without committing it.
    #[default]
    Reject,
    /// Ignore the rest of the stream and commit what fits.
    Truncate,
}

/// Chip-multiplexed single-color controller.
///
/// Every pixel of the stream is collapsed into a single brightness value by the
/// [`Brightness`] strategy, rescaled to the chip PWM resolution and assigned to the chip
/// channel given by the [`ChannelMap`]. All channel writes of a frame are sent to the chip
/// in a single commit, so LEDs never update at different times within one frame.
pub struct SingleColorChipController<C: ChipClient, B = Luma, M = Sequential> {
    client: C,
    config: SegmentConfig,
    session: Option<C::Session>,
    state: ControllerState,

    brightness: B,
    channels: M,
    overrun: OverrunPolicy,
}

impl<C, B, M> Debug for SingleColorChipController<C, B, M>
where
    C: ChipClient + Debug,
    C::Session: Debug,
    B: Debug,
    M: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SingleColorChipController")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("state", &self.state)
            .field("brightness", &self.brightness)
            .field("channels", &self.channels)
            .field("overrun", &self.overrun)
            .finish()
    }
}

impl<C: ChipClient> SingleColorChipController<C> {
    /// Creates a new controller with luma brightness and sequential channel assignment.
    ///
    /// The chip session is opened later, by [`Controller::init`].
    pub fn new(client: C, config: SegmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            config,
            session: None,
            state: ControllerState::Uninitialized,
            brightness: Luma,
            channels: Sequential,
            overrun: OverrunPolicy::default(),
        })
    }
}

impl<C, B, M> SingleColorChipController<C, B, M>
where
    C: ChipClient,
    B: Brightness,
    M: ChannelMap,
{
    /// Replaces the brightness derivation strategy.
    pub fn with_brightness<T>(self, brightness: T) -> SingleColorChipController<C, T, M>
    where
        T: Brightness,
    {
        SingleColorChipController {
            client: self.client,
            config: self.config,
            session: self.session,
            state: self.state,
            brightness,
            channels: self.channels,
            overrun: self.overrun,
        }
    }

    /// Replaces the pixel position to chip channel assignment.
    pub fn with_channel_map<T>(self, channels: T) -> SingleColorChipController<C, B, T>
    where
        T: ChannelMap,
    {
        SingleColorChipController {
            client: self.client,
            config: self.config,
            session: self.session,
            state: self.state,
            brightness: self.brightness,
            channels,
            overrun: self.overrun,
        }
    }

    #[must_use]
    pub fn with_overrun_policy(mut self, overrun: OverrunPolicy) -> Self {
        self.overrun = overrun;
        self
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the chip session, if the controller has been initialized.
    pub fn session(&self) -> Option<&C::Session> {
        self.session.as_ref()
    }

    /// Returns the number of leading pixels of the source which fit into the segment.
    ///
    /// Only peeks at the source, the cursor is left untouched.
    fn fitting_pixels<S>(&self, pixels: &S) -> Result<usize>
    where
        S: PixelSource + ?Sized,
    {
        let capacity = self.config.capacity;

        let mut position = 0;
        while pixels.has(position + 1) {
            let target = self.channels.channel(position);
            if target.is_some_and(|channel| channel < capacity) {
                position += 1;
                continue;
            }

            let channel = target.unwrap_or(position);
            match self.overrun {
                OverrunPolicy::Reject => {
                    log::warn!(
                        "Pixel {} targets channel {} of {}, dropping the frame",
                        position,
                        channel,
                        capacity
                    );
                    return Err(Error::ChannelOverrun { channel, capacity });
                }
                OverrunPolicy::Truncate => {
                    log::warn!(
                        "Pixel {} targets channel {} of {}, truncating the frame",
                        position,
                        channel,
                        capacity
                    );
                    break;
                }
            }
        }
        Ok(position)
    }
}

impl<C, B, M> Controller for SingleColorChipController<C, B, M>
where
    C: ChipClient,
    B: Brightness,
    M: ChannelMap,
{
    const KIND: ControllerKind = ControllerKind::Streaming;

    fn init(&mut self) -> Result<()> {
        // Outputs are not known to be dark until the zeroing commit succeeds.
        let needs_begin = self.state == ControllerState::Uninitialized;
        self.state = ControllerState::Uninitialized;

        if self.session.is_none() {
            self.session = Some(self.client.open(&self.config)?);
        }
        let session = self.session.as_mut().ok_or(Error::NotInitialized)?;
        if needs_begin {
            session.begin()?;
        }

        for channel in 0..self.config.capacity {
            session.set_channel_level(channel, 0)?;
        }
        session.commit()?;

        log::debug!(
            "Chip controller is ready: {} channels, clock {}, data {}, latch {}",
            self.config.capacity,
            self.config.clock,
            self.config.data,
            self.config.latch
        );
        self.state = ControllerState::Ready;
        Ok(())
    }

    fn show_pixels<S>(&mut self, pixels: &mut S) -> Result<()>
    where
        S: PixelSource + ?Sized,
    {
        if self.state != ControllerState::Ready {
            return Err(Error::NotInitialized);
        }
        // Nothing is staged until the whole frame is known to fit.
        let count = self.fitting_pixels(pixels)?;

        let session = self.session.as_mut().ok_or(Error::NotInitialized)?;
        let capacity = self.config.capacity;
        for position in 0..count {
            let channel = self
                .channels
                .channel(position)
                .ok_or(Error::ChannelOverrun {
                    channel: position,
                    capacity,
                })?;

            let color = pixels.load_and_scale();
            let brightness = self.brightness.brightness(color);
            let level = map8_to(brightness, <C::Session as ChipSession>::MAX_LEVEL);
            session.set_channel_level(channel, level)?;

            pixels.step_dithering();
            pixels.advance_data();
        }

        log::trace!("Rendered {} pixels", count);
        session.commit()
    }

    fn state(&self) -> ControllerState {
        self.state
    }
}
