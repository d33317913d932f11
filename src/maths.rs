// Copyright 2022 Redglyph
//
// Integer approximations of logarithms, divisibility predicates and multiply-shift primitives.

use ilog::IntLog;

/// Returns `ceil(log2(5^e))` for `e >= 1`, and `1` for `e == 0`.
///
/// The approximation holds up to `e = 3528`, where the multiplication overflows.
#[inline]
pub(crate) fn pow5bits(e: i32) -> i32 {
    debug_assert!((0..=3528).contains(&e));
    (((e as u32) * 1217359) >> 19) as i32 + 1
}

/// Returns `floor(log10(2^e))`; exact up to `e = 1650`.
#[inline]
pub(crate) fn log10_pow2(e: i32) -> u32 {
    debug_assert!((0..=1650).contains(&e));
    ((e as u32) * 78913) >> 18
}

/// Returns `floor(log10(5^e))`; exact up to `e = 2620`.
#[inline]
pub(crate) fn log10_pow5(e: i32) -> u32 {
    debug_assert!((0..=2620).contains(&e));
    ((e as u32) * 732923) >> 20
}

fn pow5_factor_64(mut value: u64) -> u32 {
    let mut count = 0;
    loop {
        debug_assert!(value != 0);
        if value % 5 != 0 {
            return count;
        }
        value /= 5;
        count += 1;
    }
}

fn pow5_factor_32(mut value: u32) -> u32 {
    let mut count = 0;
    loop {
        debug_assert!(value != 0);
        if value % 5 != 0 {
            return count;
        }
        value /= 5;
        count += 1;
    }
}

/// Whether `value` is divisible by `5^p`.
#[inline]
pub(crate) fn multiple_of_pow5_64(value: u64, p: u32) -> bool {
    pow5_factor_64(value) >= p
}

/// Whether `value` is divisible by `5^p`.
#[inline]
pub(crate) fn multiple_of_pow5_32(value: u32, p: u32) -> bool {
    pow5_factor_32(value) >= p
}

/// Whether `value` is divisible by `2^p`, with `p < 64`.
#[inline]
pub(crate) fn multiple_of_pow2_64(value: u64, p: u32) -> bool {
    debug_assert!(p < 64);
    value & ((1 << p) - 1) == 0
}

/// Whether `value` is divisible by `2^p`, with `p < 32`.
#[inline]
pub(crate) fn multiple_of_pow2_32(value: u32, p: u32) -> bool {
    debug_assert!(p < 32);
    value & ((1 << p) - 1) == 0
}

/// Computes `floor(m * mul / 2^j)`, where `mul` is a 128-bit `(low, high)` multiplier and
/// `j >= 64`.
#[inline]
pub(crate) fn mul_shift_64(m: u64, mul: (u64, u64), j: u32) -> u64 {
    debug_assert!(j >= 64);
    let b0 = m as u128 * mul.0 as u128;
    let b2 = m as u128 * mul.1 as u128;
    (((b0 >> 64) + b2) >> (j - 64)) as u64
}

/// Computes `floor(m * factor / 2^shift)` with `shift > 32`; the result must fit 32 bits.
#[inline]
pub(crate) fn mul_shift_32(m: u32, factor: u64, shift: i32) -> u32 {
    debug_assert!(shift > 32);
    let factor_lo = factor as u32;
    let factor_hi = (factor >> 32) as u32;
    let bits0 = m as u64 * factor_lo as u64;
    let bits1 = m as u64 * factor_hi as u64;
    let sum = (bits0 >> 32) + bits1;
    let shifted_sum = sum >> (shift - 32);
    debug_assert!(shifted_sum <= u32::MAX as u64);
    shifted_sum as u32
}

/// Number of decimal digits of `value`, which must not be zero.
#[inline]
pub(crate) fn decimal_length(value: u64) -> usize {
    debug_assert!(value != 0);
    value.log10() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logarithms() {
        for e in 1..=3528 {
            let bits = e as f64 * 5_f64.log2();
            let exact = bits.ceil() as i32;
            // float rounding is only trusted away from integers
            if bits.fract() > 1e-9 && bits.fract() < 1.0 - 1e-9 {
                assert_eq!(pow5bits(e), exact, "pow5bits({e})");
            }
        }
        assert_eq!(pow5bits(0), 1);
        assert_eq!(pow5bits(1), 3);
        assert_eq!(log10_pow2(0), 0);
        assert_eq!(log10_pow2(3), 0);
        assert_eq!(log10_pow2(4), 1);
        assert_eq!(log10_pow2(10), 3);
        assert_eq!(log10_pow2(1000), 301);
        assert_eq!(log10_pow5(0), 0);
        assert_eq!(log10_pow5(1), 0);
        assert_eq!(log10_pow5(2), 1);
        assert_eq!(log10_pow5(3), 2);
        assert_eq!(log10_pow5(10), 6);
    }

    #[test]
    fn divisibility() {
        assert!(multiple_of_pow5_64(625, 4));
        assert!(!multiple_of_pow5_64(625, 5));
        assert!(multiple_of_pow5_64(7, 0));
        assert!(multiple_of_pow5_32(3125, 5));
        assert!(!multiple_of_pow5_32(3126, 1));
        assert!(multiple_of_pow2_64(96, 5));
        assert!(!multiple_of_pow2_64(96, 6));
        assert!(multiple_of_pow2_32(1 << 20, 20));
        assert!(!multiple_of_pow2_32(3, 1));
    }

    #[test]
    fn multiply_shift() {
        // 3 * 2^127 / 2^126 = 6
        assert_eq!(mul_shift_64(3, (0, 1 << 63), 126), 6);
        // (2^64 + 1) * 7 / 2^64 = 7
        assert_eq!(mul_shift_64(7, (1, 1), 64), 7);
        assert_eq!(mul_shift_32(10, 1 << 40, 41), 5);
        assert_eq!(mul_shift_32(u32::MAX, 1 << 33, 33), u32::MAX);
    }

    #[test]
    fn lengths() {
        let mut value = 1_u64;
        for n in 1..=19 {
            assert_eq!(decimal_length(value), n);
            assert_eq!(decimal_length(value * 9), n);
            value *= 10;
        }
        assert_eq!(decimal_length(u64::MAX), 20);
    }
}
