//! LED output controllers.
//!
//! - [`TriColorController`] drives a single tri-color fixture through three analog lines.
//! - [`SingleColorChipController`] drives a row of single-color LEDs through a chained
//!   PWM driver chip, one chip channel per pixel.
//!
//! Both controllers implement [`amiacs_core::Controller`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub use crate::{
    channel_map::{ChannelMap, Offset, Reversed, Sequential, Table},
    pwm::PwmBank,
    single_color::{OverrunPolicy, SingleColorChipController},
    tlc5947::{Tlc5947, Tlc5947Client, TLC5947_CHANNELS},
    tri_color::TriColorController,
};

pub mod channel_map;
pub mod pwm;
pub mod single_color;
#[cfg(feature = "std")]
pub mod test_utils;
pub mod tlc5947;
pub mod tri_color;
