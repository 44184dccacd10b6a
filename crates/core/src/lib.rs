//! Output adapters contracts for the Amiacs light controller.
//!
//! This crate describes how a stream of logical color values reaches the LED hardware:
//!
//! - [`PixelSource`] is a forward-only cursor over one frame of scaled colors;
//! - [`Controller`] consumes a pixel source once per frame and drives its outputs;
//! - [`AnalogOutput`] and [`ChipClient`]/[`ChipSession`] are the output sinks
//!   controllers write to.
//!
//! The concrete controllers live in the `amiacs-controllers` crate.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub use smart_leds::RGB8;

pub use crate::{
    brightness::{Average, Brightness, Luma, MaxChannel},
    config::{Pin, SegmentConfig, TriColorPins, MAX_SEGMENT_CHANNELS},
    controller::{Controller, ControllerKind, ControllerState},
    errors::{ConfigurationError, Error, Result},
    output::{AnalogOutput, ChipClient, ChipSession},
    pixels::{ColorOrder, PixelSource, SlicePixels},
};

pub mod brightness;
pub mod config;
pub mod controller;
pub mod errors;
pub mod math8;
pub mod output;
pub mod pixels;
