//! Single tri-color LED fixture driven by three analog lines.

use amiacs_core::{
    AnalogOutput, ConfigurationError, Controller, ControllerKind, ControllerState, Error,
    PixelSource, Result, TriColorPins,
};

/// Direct tri-color controller.
///
/// Each frame takes exactly one pixel from the source, assuming the framework has
/// already collapsed the whole strip into one representative color. Channels 0, 1 and 2
/// of that pixel drive the red, green and blue lines respectively.
#[derive(Debug)]
pub struct TriColorController<A> {
    output: A,
    pins: TriColorPins,
    state: ControllerState,
}

impl<A: AnalogOutput> TriColorController<A> {
    /// Creates a new controller, checking that every pin is distinct and drivable.
    pub fn new(output: A, pins: TriColorPins) -> Result<Self> {
        pins.validate()?;
        if let Some(pin) = pins.as_array().into_iter().find(|pin| !output.is_valid_pin(*pin)) {
            return Err(ConfigurationError::UnknownPin(pin.0).into());
        }

        Ok(Self {
            output,
            pins,
            state: ControllerState::Uninitialized,
        })
    }

    pub fn pins(&self) -> TriColorPins {
        self.pins
    }

    pub fn output(&self) -> &A {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut A {
        &mut self.output
    }

    /// Returns back the underlying output.
    pub fn into_inner(self) -> A {
        self.output
    }

    fn write(&mut self, levels: [u8; 3]) -> Result<()> {
        for (pin, level) in self.pins.as_array().into_iter().zip(levels) {
            self.output.write_analog_level(pin, level)?;
        }
        Ok(())
    }
}

impl<A: AnalogOutput> Controller for TriColorController<A> {
    const KIND: ControllerKind = ControllerKind::SingleFixture;

    fn init(&mut self) -> Result<()> {
        for pin in self.pins.as_array() {
            self.output.configure_as_output(pin)?;
        }
        self.write([0; 3])?;

        log::debug!(
            "Tri-color controller is ready: red {}, green {}, blue {}",
            self.pins.red,
            self.pins.green,
            self.pins.blue
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
        // Nothing to show, the lines keep their previous levels.
        if !pixels.has(1) {
            return Ok(());
        }

        let r = pixels.load_and_scale0();
        let g = pixels.load_and_scale1();
        let b = pixels.load_and_scale2();
        self.write([r, g, b])?;

        pixels.step_dithering();
        pixels.advance_data();
        Ok(())
    }

    fn state(&self) -> ControllerState {
        self.state
    }
}
