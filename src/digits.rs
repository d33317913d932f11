// Copyright 2022 Redglyph
//
// Decimal digit rendering.

use crate::tables::DIGITS100;

/// Layout of the digits written by [write_digits].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DigitsMode {
    /// `olength` digits, nothing else.
    DigitsOnly,
    /// The first digit, then `.` and the remaining digits when there is more than one digit
    /// (scientific mantissa).
    MantissaWithDot,
}

/// Converts `value` into 2 decimal ASCII digits at `result[offset..offset + 2]`.
///
/// * `value`: integer, 0 <= value <= 99
#[inline]
pub(crate) fn write_2digits(result: &mut [u8], offset: usize, value: u32) {
    debug_assert!(value <= 99);
    let i = 2 * value as usize;
    result[offset..offset + 2].copy_from_slice(&DIGITS100[i..i + 2]);
}

/// Writes the `olength` decimal digits of `value` at `result[index..]`.
///
/// The digits are produced backward, from the least significant pair to the first digit, so
/// the last position is computed first; `olength` must be the exact number of digits of `value`.
///
/// Returns the number of bytes written: `olength`, plus one for the dot in
/// [DigitsMode::MantissaWithDot] mode when `olength > 1`.
pub(crate) fn write_digits(result: &mut [u8], index: usize, value: u64, olength: usize, mode: DigitsMode) -> usize {
    debug_assert!(value != 0 || olength == 1);
    debug_assert!(olength <= 17);
    let with_dot = mode == DigitsMode::MantissaWithDot && olength > 1;
    // one past the last digit
    let mut pos = index + olength + usize::from(with_dot);
    let mut output = value;

    // We prefer 32-bit operations: if output doesn't fit 32 bits, we cut off 8 digits.
    if output >> 32 != 0 {
        let mut output2 = (output % 100_000_000) as u32;
        output /= 100_000_000;
        let c = output2 % 10000;
        output2 /= 10000;
        let d = output2 % 10000;
        write_2digits(result, pos - 2, c % 100);
        write_2digits(result, pos - 4, c / 100);
        write_2digits(result, pos - 6, d % 100);
        write_2digits(result, pos - 8, d / 100);
        pos -= 8;
    }
    let mut output2 = output as u32;
    while output2 >= 10000 {
        let c = output2 % 10000;
        output2 /= 10000;
        write_2digits(result, pos - 2, c % 100);
        write_2digits(result, pos - 4, c / 100);
        pos -= 4;
    }
    if output2 >= 100 {
        write_2digits(result, pos - 2, output2 % 100);
        output2 /= 100;
        pos -= 2;
    }
    if output2 >= 10 {
        // The dot may go between these two digits.
        let c = 2 * output2 as usize;
        result[pos - 1] = DIGITS100[c + 1];
        result[index] = DIGITS100[c];
    } else {
        result[index] = b'0' + output2 as u8;
    }

    if with_dot {
        result[index + 1] = b'.';
        olength + 1
    } else {
        olength
    }
}

/// Writes exactly `width` digits of `value`, with leading zeros.
pub(crate) fn write_padded_digits(result: &mut [u8], index: usize, value: u64, width: usize) -> usize {
    let olength = if value == 0 { 1 } else { crate::maths::decimal_length(value) };
    debug_assert!(olength <= width);
    let zeros = write_zeros(result, index, width - olength);
    if value == 0 {
        result[index + zeros] = b'0';
        width
    } else {
        zeros + write_digits(result, index + zeros, value, olength, DigitsMode::DigitsOnly)
    }
}

/// Writes `count` ASCII zeros at `result[index..]`.
#[inline]
pub(crate) fn write_zeros(result: &mut [u8], index: usize, count: usize) -> usize {
    result[index..index + count].fill(b'0');
    count
}
