//! Controller lifecycle contract.

use crate::{PixelSource, Result};

/// How much of the pixel stream a controller consumes per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// Reads a single representative pixel per frame, the rest of the stream is ignored.
    SingleFixture,
    /// Consumes the whole pixel stream, one output channel per pixel.
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Uninitialized,
    Ready,
}

/// Hardware output adapter driven by the pixel-streaming framework.
///
/// The framework calls [`Controller::init`] once and then [`Controller::show_pixels`]
/// once per animation frame. Calls are never concurrent.
pub trait Controller {
    /// Consumption contract of this controller.
    const KIND: ControllerKind;

    /// Prepares the outputs and drives every one of them to zero brightness.
    ///
    /// Calling it again resets the outputs to the dark state.
    fn init(&mut self) -> Result<()>;

    /// Renders a single frame read from the given pixel source.
    fn show_pixels<S>(&mut self, pixels: &mut S) -> Result<()>
    where
        S: PixelSource + ?Sized;

    /// Returns the current lifecycle state.
    fn state(&self) -> ControllerState;
}
