// Copyright 2022 Redglyph
//
// Exact decimal expansion of integral floating-point values.

use crate::digits::{write_digits, write_padded_digits, DigitsMode};
use crate::maths::decimal_length;

/// Largest `shift` accepted by [write_integer]: `f64::MAX = (2^53 - 1) * 2^971`.
pub(crate) const MAX_SHIFT: u32 = 971;

// m < 2^53 shifted by up to 971 bits, plus one word for the shifted-out bits of the top limb
const LIMBS: usize = (53 + MAX_SHIFT as usize + 31) / 32 + 1;
// f64::MAX has 309 digits
const CHUNKS: usize = (309 + CHUNK_DIGITS - 1) / CHUNK_DIGITS;
const CHUNK: u64 = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

/// Writes the decimal digits of the integer `m * 2^shift` at `result[index..]`, and returns the
/// number of bytes written.
///
/// `m` must be non-zero and below `2^53`, and `shift <= MAX_SHIFT`.
pub(crate) fn write_integer(result: &mut [u8], index: usize, m: u64, shift: u32) -> usize {
    debug_assert!(m != 0 && m >> 53 == 0);
    debug_assert!(shift <= MAX_SHIFT);
    if shift == 0 {
        return write_digits(result, index, m, decimal_length(m), DigitsMode::DigitsOnly);
    }

    // little-endian 32-bit limbs
    let mut limbs = [0_u32; LIMBS];
    let word = (shift / 32) as usize;
    let wide = (m as u128) << (shift % 32);
    limbs[word] = wide as u32;
    limbs[word + 1] = (wide >> 32) as u32;
    limbs[word + 2] = (wide >> 64) as u32;
    let mut len = word + 3;

    // base 10^9 digits, least significant first
    let mut chunks = [0_u32; CHUNKS];
    let mut count = 0;
    loop {
        while len > 0 && limbs[len - 1] == 0 {
            len -= 1;
        }
        if len == 0 {
            break;
        }
        let mut rem = 0_u64;
        for limb in limbs[..len].iter_mut().rev() {
            let cur = rem << 32 | *limb as u64;
            *limb = (cur / CHUNK) as u32;
            rem = cur % CHUNK;
        }
        chunks[count] = rem as u32;
        count += 1;
    }

    let top = chunks[count - 1] as u64;
    let mut n = write_digits(result, index, top, decimal_length(top), DigitsMode::DigitsOnly);
    for &chunk in chunks[..count - 1].iter().rev() {
        n += write_padded_digits(result, index + n, chunk as u64, CHUNK_DIGITS);
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::{BigUint, One};

    fn integer(m: u64, shift: u32) -> String {
        let mut buffer = [0_u8; 320];
        let n = write_integer(&mut buffer, 0, m, shift);
        String::from_utf8(buffer[..n].to_vec()).unwrap()
    }

    #[test]
    fn small_values() {
        assert_eq!(integer(1, 0), "1");
        assert_eq!(integer(9007199254740991, 0), "9007199254740991");
        assert_eq!(integer(1, 1), "2");
        assert_eq!(integer(1, 54), "18014398509481984");
        assert_eq!(integer(5, 63), "46116860184273879040");
        assert_eq!(integer(1, 64), "18446744073709551616");
    }

    #[test]
    fn limits() {
        // f32::MAX = (2^24 - 1) * 2^104
        assert_eq!(integer((1 << 24) - 1, 104), "340282346638528859811704183484516925440");
        let max = integer((1 << 53) - 1, 971);
        assert_eq!(max.len(), 309);
        assert!(max.starts_with("179769313486231570814527423731704356798070567525844996598917476803"));
        assert!(max.ends_with("858368"));
        let expected = (BigUint::from((1_u64 << 53) - 1) << 971_u32).to_string();
        assert_eq!(max, expected);
    }

    #[test]
    fn against_biguint() {
        let mut rng = oorandom::Rand64::new(0);
        for _ in 0..2000 {
            let m = rng.rand_range(1..1 << 53);
            let shift = rng.rand_range(0..MAX_SHIFT as u64 + 1) as u32;
            let expected = (BigUint::from(m) * (BigUint::one() << shift as usize)).to_string();
            assert_eq!(integer(m, shift), expected, "{m} * 2^{shift}");
        }
    }
}
