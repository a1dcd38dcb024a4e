//! Narrowing of accumulated sums into channel values.
//!
//! Kernels with negative lobes can push a weighted sum below zero or above
//! the channel maximum, so every fast path funnels its result through one of
//! these.

/// Keeps `v` in `[0, 255]`.
#[inline]
pub fn clamp_u8(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u8
    }
}

/// Keeps `v` in `[0, 65535]`.
#[inline]
pub fn clamp_u16(v: i64) -> u16 {
    if v < 0 {
        0
    } else if v > 65535 {
        65535
    } else {
        v as u16
    }
}

/// Rounds a non-negative mean to the nearest byte, halves rounding up.
///
/// Anything above 254 saturates to 255, so `254.4` maps to 255.
#[inline]
pub fn round_u8(v: f32) -> u8 {
    if v > 254.0 {
        return u8::MAX;
    }
    (v + 0.5) as u8
}

/// Rounds a non-negative mean to the nearest 16-bit value, halves rounding up.
///
/// Anything above 65534 saturates to 65535.
#[inline]
pub fn round_u16(v: f32) -> u16 {
    if v > 65534.0 {
        return u16::MAX;
    }
    (v + 0.5) as u16
}
