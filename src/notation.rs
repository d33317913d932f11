// Copyright 2022 Redglyph
//
// Notation selection and layout of decimal and scientific representations.

use crate::digits::{write_2digits, write_digits, write_padded_digits, write_zeros, DigitsMode};

/// Whether `mantissa * 10^exponent`, with `olength` digits in the mantissa, is at most as long in
/// decimal notation as in scientific notation.
///
/// Scientific notation costs `olength + 5` characters for more than one digit (`d.ddde+XX`), and
/// 5 characters for a single digit (`de+XX`), the sign aside. Decimal notation costs
/// `olength + exponent` (`ddd000`), `olength + 1` (`dd.d`) or `2 - exponent` (`0.00ddd`).
/// Decimal is preferred on ties.
pub(crate) fn needs_decimal_notation(olength: usize, exponent: i32) -> bool {
    let (low, high) = if olength == 1 {
        (-3, 4)
    } else {
        (-(olength as i32 + 3), 5)
    };
    low <= exponent && exponent <= high
}

/// Writes `mantissa * 10^exponent` in scientific notation (`d.ddde+XX`) at `result[index..]`,
/// and returns the number of bytes written.
///
/// The exponent has at least two digits, three when its magnitude is 100 or more.
pub(crate) fn write_scientific(
    result: &mut [u8],
    index: usize,
    mantissa: u64,
    olength: usize,
    exponent: i32,
    exp_char: u8,
) -> usize {
    let mut n = write_digits(result, index, mantissa, olength, DigitsMode::MantissaWithDot);
    result[index + n] = exp_char;
    n += 1;
    n + write_exponent(result, index + n, exponent + olength as i32 - 1)
}

/// Writes the signed exponent of a scientific representation (`+05`, `-324`).
pub(crate) fn write_exponent(result: &mut [u8], index: usize, exponent: i32) -> usize {
    result[index] = if exponent < 0 { b'-' } else { b'+' };
    let k = exponent.unsigned_abs();
    debug_assert!(k <= 999);
    if k >= 100 {
        result[index + 1] = b'0' + (k / 100) as u8;
        write_2digits(result, index + 2, k % 100);
        4
    } else {
        write_2digits(result, index + 1, k);
        3
    }
}

/// Writes `mantissa * 10^exponent` in decimal notation at `result[index..]`, and returns the
/// number of bytes written.
pub(crate) fn write_decimal(result: &mut [u8], index: usize, mantissa: u64, olength: usize, exponent: i32) -> usize {
    if exponent >= 0 {
        // ddd000
        let n = write_digits(result, index, mantissa, olength, DigitsMode::DigitsOnly);
        return n + write_zeros(result, index + n, exponent as usize);
    }
    let fraction_length = exponent.unsigned_abs() as usize;
    if fraction_length < olength {
        // ddd.ddd
        let divisor = 10_u64.pow(fraction_length as u32);
        let integer_length = olength - fraction_length;
        let mut n = write_digits(result, index, mantissa / divisor, integer_length, DigitsMode::DigitsOnly);
        result[index + n] = b'.';
        n += 1;
        n + write_padded_digits(result, index + n, mantissa % divisor, fraction_length)
    } else {
        // 0.000ddd
        result[index..index + 2].copy_from_slice(b"0.");
        let n = 2 + write_zeros(result, index + 2, fraction_length - olength);
        n + write_digits(result, index + n, mantissa, olength, DigitsMode::DigitsOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maths::decimal_length;

    fn decimal(mantissa: u64, exponent: i32) -> String {
        let mut buffer = [0_u8; 64];
        let n = write_decimal(&mut buffer, 0, mantissa, decimal_length(mantissa), exponent);
        String::from_utf8(buffer[..n].to_vec()).unwrap()
    }

    fn scientific(mantissa: u64, exponent: i32) -> String {
        let mut buffer = [0_u8; 64];
        let n = write_scientific(&mut buffer, 0, mantissa, decimal_length(mantissa), exponent, b'e');
        String::from_utf8(buffer[..n].to_vec()).unwrap()
    }

    #[test]
    fn decimal_layouts() {
        let values: &[(u64, i32, &str)] = &[
            (1, 0, "1"),
            (1, 2, "100"),
            (1234, 3, "1234000"),
            (1234, -1, "123.4"),
            (1234, -3, "1.234"),
            (1005, -2, "10.05"),
            (10001, -3, "10.001"),
            (1234, -4, "0.1234"),
            (1234, -6, "0.001234"),
            (5, -1, "0.5"),
            (1, -4, "0.0001"),
        ];
        for (mantissa, exponent, expected) in values {
            assert_eq!(decimal(*mantissa, *exponent), *expected, "{mantissa}e{exponent}");
        }
    }

    #[test]
    fn scientific_layouts() {
        let values: &[(u64, i32, &str)] = &[
            (1, 0, "1e+00"),
            (1, 2, "1e+02"),
            (1, -4, "1e-04"),
            (15, 9, "1.5e+10"),
            (5, -324, "5e-324"),
            (17976931348623157, 292, "1.7976931348623157e+308"),
            (22250738585072014, -324, "2.2250738585072014e-308"),
            (123, -102, "1.23e-100"),
            (123, -101, "1.23e-99"),
        ];
        for (mantissa, exponent, expected) in values {
            assert_eq!(scientific(*mantissa, *exponent), *expected, "{mantissa}e{exponent}");
        }
    }

    #[test]
    fn notation_bounds() {
        // single digit: [-3, 4]
        assert!(!needs_decimal_notation(1, -4));
        assert!(needs_decimal_notation(1, -3));
        assert!(needs_decimal_notation(1, 4));
        assert!(!needs_decimal_notation(1, 5));
        // several digits: [-(olength + 3), 5]
        assert!(!needs_decimal_notation(2, -6));
        assert!(needs_decimal_notation(2, -5));
        assert!(needs_decimal_notation(17, -20));
        assert!(!needs_decimal_notation(17, -21));
        assert!(needs_decimal_notation(17, 5));
        assert!(!needs_decimal_notation(17, 6));
    }

    #[test]
    fn decimal_wins_ties() {
        // the bounds are exactly where the lengths cross, decimal included
        for olength in 1..=17_usize {
            let mantissa = 10_u64.pow(olength as u32 - 1) + 1 - u64::from(olength == 1);
            for exponent in -40..=40 {
                let dec = decimal(mantissa, exponent).len();
                let sci = scientific(mantissa, exponent).len();
                assert_eq!(needs_decimal_notation(olength, exponent), dec <= sci, "{mantissa}e{exponent}");
            }
        }
    }
}
