//! Integer helpers for 8-bit color math.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Full scale keeps the value untouched, so `scale8(v, 255) == v`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((u16::from(value) * (1 + u16::from(scale))) >> 8) as u8
}

/// Add two 8-bit values, saturating at 255.
#[inline]
pub fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Linearly map an 8-bit value onto `0..=max_level`.
///
/// The mapping is `value * max_level / 255`, rounded down.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn map8_to(value: u8, max_level: u16) -> u16 {
    (u32::from(value) * u32::from(max_level) / 255) as u16
}
