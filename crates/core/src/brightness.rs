//! Brightness derivation strategies for single-color LEDs.
//!
//! A single-color LED can only show how bright a pixel is, so every RGB triple is
//! collapsed into one 8-bit value. [`Luma`] is the default choice.

use crate::RGB8;

/// Strategy to collapse a color into a single 8-bit brightness.
pub trait Brightness {
    fn brightness(&self, color: RGB8) -> u8;
}

impl<F> Brightness for F
where
    F: Fn(RGB8) -> u8,
{
    fn brightness(&self, color: RGB8) -> u8 {
        self(color)
    }
}

/// Perceptual brightness with integer luma weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Luma;

impl Luma {
    /// Red, green and blue weights, their sum is exactly 255.
    pub const WEIGHTS: [u32; 3] = [54, 183, 18];
}

impl Brightness for Luma {
    fn brightness(&self, color: RGB8) -> u8 {
        luma(color)
    }
}

/// Computes the luma of the given color, rounded to the nearest integer.
///
/// Black maps to 0 and white maps to 255.
#[allow(clippy::cast_possible_truncation)]
pub fn luma(color: RGB8) -> u8 {
    let [wr, wg, wb] = Luma::WEIGHTS;
    let sum = wr * u32::from(color.r) + wg * u32::from(color.g) + wb * u32::from(color.b);
    ((sum + 127) / 255) as u8
}

/// Arithmetic mean of the three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Average;

impl Brightness for Average {
    #[allow(clippy::cast_possible_truncation)]
    fn brightness(&self, color: RGB8) -> u8 {
        let sum = u16::from(color.r) + u16::from(color.g) + u16::from(color.b);
        (sum / 3) as u8
    }
}

/// The brightest channel wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxChannel;

impl Brightness for MaxChannel {
    fn brightness(&self, color: RGB8) -> u8 {
        color.r.max(color.g).max(color.b)
    }
}
