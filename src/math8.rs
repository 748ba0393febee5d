//! 8-bit helpers shared by the modulator and the ramp model.
//!
//! Everything here wraps modulo 256. Ramps rely on that overflow to produce
//! bounce and sawtooth shapes, so nothing may saturate.

/// Level of a linear ramp after `frames` steps
///
/// Equivalent to adding `increment` to `initial` `frames` times.
#[inline]
pub const fn ramp8(initial: u8, increment: u8, frames: u8) -> u8 {
    initial.wrapping_add(increment.wrapping_mul(frames))
}

/// Encode a per-frame decrement as the increment that produces it
#[inline]
pub const fn decrement8(step: u8) -> u8 {
    0u8.wrapping_sub(step)
}

/// Output bit of a channel for one subframe
#[inline]
pub const fn lit8(level: u8, subframe: u8) -> bool {
    level > subframe
}

/// Number of subframes a level stays lit within one frame
#[inline]
pub const fn duty8(level: u8, subframe_limit: u8) -> u8 {
    if level < subframe_limit {
        level
    } else {
        subframe_limit
    }
}
