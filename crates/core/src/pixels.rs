//! Pixel source abstraction and its slice-backed implementation.

use serde::{Deserialize, Serialize};

use crate::{
    math8::{qadd8, scale8},
    RGB8,
};

/// Forward-only cursor over the color data of a single frame.
///
/// Channels are returned in the wire order of the strip, with the framework-side
/// scaling (and dithering, if any) already applied.
pub trait PixelSource {
    /// Returns true if there are at least `n` more pixels to read.
    fn has(&self, n: usize) -> bool;
    /// Returns the first channel of the current pixel.
    fn load_and_scale0(&mut self) -> u8;
    /// Returns the second channel of the current pixel.
    fn load_and_scale1(&mut self) -> u8;
    /// Returns the third channel of the current pixel.
    fn load_and_scale2(&mut self) -> u8;
    /// Advances the dithering phase.
    fn step_dithering(&mut self);
    /// Moves the cursor to the next pixel.
    fn advance_data(&mut self);

    /// Returns all three channels of the current pixel.
    fn load_and_scale(&mut self) -> RGB8 {
        let r = self.load_and_scale0();
        let g = self.load_and_scale1();
        let b = self.load_and_scale2();
        RGB8::new(r, g, b)
    }
}

impl<T: ?Sized + PixelSource> PixelSource for &mut T {
    fn has(&self, n: usize) -> bool {
        T::has(self, n)
    }

    fn load_and_scale0(&mut self) -> u8 {
        T::load_and_scale0(self)
    }

    fn load_and_scale1(&mut self) -> u8 {
        T::load_and_scale1(self)
    }

    fn load_and_scale2(&mut self) -> u8 {
        T::load_and_scale2(self)
    }

    fn step_dithering(&mut self) {
        T::step_dithering(self);
    }

    fn advance_data(&mut self) {
        T::advance_data(self);
    }
}

/// The order in which color components are sent over the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Rearranges a logical color into the wire channels order.
    pub const fn apply(self, color: RGB8) -> [u8; 3] {
        let (r, g, b) = (color.r, color.g, color.b);
        match self {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Rbg => [r, b, g],
            ColorOrder::Grb => [g, r, b],
            ColorOrder::Gbr => [g, b, r],
            ColorOrder::Brg => [b, r, g],
            ColorOrder::Bgr => [b, g, r],
        }
    }
}

/// Binary temporal dithering state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dithering {
    d: [u8; 3],
    e: [u8; 3],
}

impl Dithering {
    #[allow(clippy::cast_possible_truncation)]
    fn new(frame: u8, scales: [u8; 3]) -> Self {
        // Bit-reversed lowest bits of the frame counter.
        let mut q = 0_u8;
        if frame & 0x01 != 0 {
            q |= 0x80;
        }
        if frame & 0x02 != 0 {
            q |= 0x40;
        }
        if frame & 0x04 != 0 {
            q |= 0x20;
        }

        let mut d = [0_u8; 3];
        let mut e = [0_u8; 3];
        for i in 0..3 {
            let s = scales[i];
            e[i] = if s == 0 {
                0
            } else {
                (256 / u16::from(s) + 1).min(255) as u8
            };
            d[i] = scale8(q, e[i]);
            e[i] = e[i].saturating_sub(1);
        }
        Self { d, e }
    }

    fn step(&mut self) {
        for i in 0..3 {
            self.d[i] = self.e[i].saturating_sub(self.d[i]);
        }
    }
}

/// A pixel source over a borrowed frame of colors.
#[derive(Debug, Clone)]
pub struct SlicePixels<'a> {
    pixels: &'a [RGB8],
    order: ColorOrder,
    scale: RGB8,
    frame: Option<u8>,

    scales: [u8; 3],
    dithering: Option<Dithering>,
}

impl<'a> SlicePixels<'a> {
    /// Creates a source with the RGB order, full scale and no dithering.
    pub fn new(pixels: &'a [RGB8]) -> Self {
        let mut source = Self {
            pixels,
            order: ColorOrder::Rgb,
            scale: RGB8::new(255, 255, 255),
            frame: None,
            scales: [255; 3],
            dithering: None,
        };
        source.refresh();
        source
    }

    #[must_use]
    pub fn with_order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self.refresh();
        self
    }

    /// Sets the per-channel scale in the logical RGB order.
    #[must_use]
    pub fn with_scale(mut self, scale: RGB8) -> Self {
        self.scale = scale;
        self.refresh();
        self
    }

    /// Enables binary dithering seeded by the given frame counter.
    #[must_use]
    pub fn with_dithering(mut self, frame: u8) -> Self {
        self.frame = Some(frame);
        self.refresh();
        self
    }

    /// Returns the number of pixels left in the frame.
    pub fn remaining(&self) -> usize {
        self.pixels.len()
    }

    fn refresh(&mut self) {
        self.scales = self.order.apply(self.scale);
        self.dithering = self.frame.map(|frame| Dithering::new(frame, self.scales));
    }

    fn load(&self, channel: usize) -> u8 {
        let value = self
            .pixels
            .first()
            .map_or(0, |pixel| self.order.apply(*pixel)[channel]);
        let scale = self.scales[channel];

        match &self.dithering {
            // Dark channels stay dark.
            Some(_) if value == 0 => 0,
            Some(dithering) => scale8(qadd8(value, dithering.d[channel]), scale),
            None => scale8(value, scale),
        }
    }
}

impl PixelSource for SlicePixels<'_> {
    fn has(&self, n: usize) -> bool {
        self.pixels.len() >= n
    }

    fn load_and_scale0(&mut self) -> u8 {
        self.load(0)
    }

    fn load_and_scale1(&mut self) -> u8 {
        self.load(1)
    }

    fn load_and_scale2(&mut self) -> u8 {
        self.load(2)
    }

    fn step_dithering(&mut self) {
        if let Some(dithering) = &mut self.dithering {
            dithering.step();
        }
    }

    fn advance_data(&mut self) {
        if let Some((_, rest)) = self.pixels.split_first() {
            self.pixels = rest;
        }
    }
}
