/// Converts a `u32` value into a `f32` value in the range `[0.0, 1.0)`.
///
/// Only the 24 most significant bits are used, which is exactly what an `f32` mantissa can
/// represent without rounding.
#[inline]
pub fn f32_from_u32_01(x: u32) -> f32 {
    (x >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Maps a `u64` value uniformly-ish into `0..n` using the widening multiplication trick.
///
/// # Panics
///
/// In debug builds, this function panics if `n` is zero.
#[inline]
pub fn u64_below(x: u64, n: u64) -> u64 {
    debug_assert!(n != 0, "cannot pick a value below zero");
    ((x as u128 * n as u128) >> 64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval_is_half_open() {
        assert_eq!(f32_from_u32_01(0), 0.0);
        assert!(f32_from_u32_01(u32::MAX) < 1.0);
        assert!(f32_from_u32_01(u32::MAX / 2) > 0.49);
    }

    #[test]
    fn below_stays_in_range() {
        assert_eq!(u64_below(0, 7), 0);
        assert_eq!(u64_below(u64::MAX, 7), 6);
        assert_eq!(u64_below(u64::MAX / 2, 2), 0);
        assert_eq!(u64_below(u64::MAX / 2 + 1, 2), 1);
    }
}
