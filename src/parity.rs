//! Channel parity helpers.
//!
//! A channel carries one bit in its parity: even means `0`, odd means `1`.

/// Returns `true` when the channel value currently encodes a `1`.
#[inline]
pub fn is_odd(value: u8) -> bool {
    value & 1 == 1
}

/// Adjust `value` by at most one so that its parity matches `want_odd`.
///
/// A mismatching value is decremented, except `0` which is raised to `1`.
/// `255` is odd, so it only ever moves down; the result is always in range.
#[inline]
pub fn force_parity(value: u8, want_odd: bool) -> u8 {
    if is_odd(value) == want_odd {
        value
    } else if value == 0 {
        1
    } else {
        value - 1
    }
}
