// Copyright 2022 Redglyph
//
// Top-level conversions of f64 and f32 values into caller-supplied buffers.

use crate::Encoding;
use crate::double::Double;
use crate::exact::write_integer;
use crate::maths::decimal_length;
use crate::notation::{needs_decimal_notation, write_decimal, write_scientific};
use crate::single::Single;

/// Minimum buffer length of [d2g_buffered], NUL terminator included.
pub const D2G_BUFFER_LEN: usize = 25;
/// Minimum buffer length of [d2d_buffered], NUL terminator included.
pub const D2D_BUFFER_LEN: usize = 328;
/// Minimum buffer length of [d2s_buffered], NUL terminator included.
pub const D2S_BUFFER_LEN: usize = 25;
/// Minimum buffer length of [d2m_buffered], NUL terminator included.
pub const D2M_BUFFER_LEN: usize = 25;
/// Minimum buffer length of [f2g_buffered], NUL terminator included.
pub const F2G_BUFFER_LEN: usize = 16;
/// Minimum buffer length of [f2d_buffered], NUL terminator included.
pub const F2D_BUFFER_LEN: usize = 49;
/// Minimum buffer length of [f2s_buffered], NUL terminator included.
pub const F2S_BUFFER_LEN: usize = 16;
/// Minimum buffer length of [f2m_buffered], NUL terminator included.
pub const F2M_BUFFER_LEN: usize = 16;

/// Output notation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Shortest of decimal and scientific notation, decimal on ties.
    #[default]
    General,
    /// Always decimal; integral values are written with all their digits.
    Decimal,
    /// Always scientific.
    Scientific,
    /// Like [Notation::General], but integral values written in decimal notation have all their
    /// digits instead of the shortest ones padded with zeros.
    Minimal,
}

impl Notation {
    /// Longest representation of an `f64` value, without NUL terminator.
    pub const fn max_len_f64(self) -> usize {
        match self {
            Notation::General => D2G_BUFFER_LEN - 1,
            Notation::Decimal => D2D_BUFFER_LEN - 1,
            Notation::Scientific => D2S_BUFFER_LEN - 1,
            Notation::Minimal => D2M_BUFFER_LEN - 1,
        }
    }

    /// Longest representation of an `f32` value, without NUL terminator.
    pub const fn max_len_f32(self) -> usize {
        match self {
            Notation::General => F2G_BUFFER_LEN - 1,
            Notation::Decimal => F2D_BUFFER_LEN - 1,
            Notation::Scientific => F2S_BUFFER_LEN - 1,
            Notation::Minimal => F2M_BUFFER_LEN - 1,
        }
    }
}

// ---------------------------------------------------------------------------------------------

/// Decoded IEEE-754 value, as consumed by [write_value].
pub(crate) trait Decoded: Copy {
    fn negative(&self) -> bool;
    fn class(&self) -> Encoding;
    /// Shortest representation `(mantissa, exponent)` of a non-zero finite value.
    fn decimal(&self) -> (u64, i32);
    /// `Some((m, shift))` when the value is the integer `m * 2^shift`.
    fn integer(&self) -> Option<(u64, u32)>;
}

impl Decoded for Double {
    fn negative(&self) -> bool {
        self.sign()
    }

    fn class(&self) -> Encoding {
        self.encoding()
    }

    fn decimal(&self) -> (u64, i32) {
        let dec = self.shortest();
        (dec.mantissa, dec.exponent)
    }

    fn integer(&self) -> Option<(u64, u32)> {
        self.integral_value()
    }
}

impl Decoded for Single {
    fn negative(&self) -> bool {
        self.sign()
    }

    fn class(&self) -> Encoding {
        self.encoding()
    }

    fn decimal(&self) -> (u64, i32) {
        let dec = self.shortest();
        (dec.mantissa as u64, dec.exponent)
    }

    fn integer(&self) -> Option<(u64, u32)> {
        self.integral_value()
    }
}

/// Writes `value` in the given notation at the start of `result`, and returns the number of
/// bytes written.
pub(crate) fn write_value<T: Decoded>(value: T, notation: Notation, exp_char: u8, result: &mut [u8]) -> usize {
    let sign = match value.class() {
        Encoding::NaN => return write_str(result, b"NaN"),
        Encoding::Inf => return write_str(result, if value.negative() { b"-INF" } else { b"+INF" }),
        _ => value.negative(),
    };
    let index = usize::from(sign);
    if sign {
        result[0] = b'-';
    }
    if let Encoding::Zero = value.class() {
        result[index] = b'0';
        if notation != Notation::Scientific {
            return index + 1;
        }
        result[index + 1] = exp_char;
        return index + 2 + write_str(&mut result[index + 2..], b"+00");
    }

    index + match notation {
        Notation::Decimal => match value.integer() {
            Some((m, shift)) => write_integer(result, index, m, shift),
            None => {
                let (mantissa, exponent) = value.decimal();
                write_decimal(result, index, mantissa, decimal_length(mantissa), exponent)
            }
        },
        Notation::Scientific => {
            let (mantissa, exponent) = value.decimal();
            write_scientific(result, index, mantissa, decimal_length(mantissa), exponent, exp_char)
        }
        Notation::General | Notation::Minimal => {
            let (mantissa, exponent) = value.decimal();
            let olength = decimal_length(mantissa);
            if !needs_decimal_notation(olength, exponent) {
                write_scientific(result, index, mantissa, olength, exponent, exp_char)
            } else {
                match value.integer() {
                    Some((m, shift)) if notation == Notation::Minimal => write_integer(result, index, m, shift),
                    _ => write_decimal(result, index, mantissa, olength, exponent),
                }
            }
        }
    }
}

#[inline]
fn write_str(result: &mut [u8], text: &[u8]) -> usize {
    result[..text.len()].copy_from_slice(text);
    text.len()
}

#[inline]
fn write_f64(f: f64, notation: Notation, result: &mut [u8]) -> usize {
    debug_assert!(result.len() >= notation.max_len_f64(), "buffer too small for {notation:?}");
    write_value(Double::from(f), notation, b'e', result)
}

#[inline]
fn write_f32(f: f32, notation: Notation, result: &mut [u8]) -> usize {
    debug_assert!(result.len() >= notation.max_len_f32(), "buffer too small for {notation:?}");
    write_value(Single::from(f), notation, b'e', result)
}

#[inline]
fn terminate(result: &mut [u8], n: usize) {
    result[n] = 0;
}

// ---------------------------------------------------------------------------------------------
// f64

/// Writes the shortest representation of `f` that reads back to the same value, choosing the
/// shorter of decimal and scientific notation (decimal on ties).
///
/// `result` must be at least `D2G_BUFFER_LEN - 1` bytes long. Returns the number of bytes written.
///
/// ```
/// use blp_ryu::{d2g_buffered_n, D2G_BUFFER_LEN};
///
/// let mut buffer = [0_u8; D2G_BUFFER_LEN];
/// let n = d2g_buffered_n(0.3, &mut buffer);
/// assert_eq!(&buffer[..n], b"0.3");
/// let n = d2g_buffered_n(1e22, &mut buffer);
/// assert_eq!(&buffer[..n], b"1e+22");
/// ```
pub fn d2g_buffered_n(f: f64, result: &mut [u8]) -> usize {
    write_f64(f, Notation::General, result)
}

/// Writes `f` in decimal notation. Integral values are written exactly, the others with their
/// shortest digits.
///
/// `result` must be at least `D2D_BUFFER_LEN - 1` bytes long. Returns the number of bytes written.
pub fn d2d_buffered_n(f: f64, result: &mut [u8]) -> usize {
    write_f64(f, Notation::Decimal, result)
}

/// Writes the shortest digits of `f` in scientific notation (`d.ddde+XX`).
///
/// `result` must be at least `D2S_BUFFER_LEN - 1` bytes long. Returns the number of bytes written.
pub fn d2s_buffered_n(f: f64, result: &mut [u8]) -> usize {
    write_f64(f, Notation::Scientific, result)
}

/// Writes `f` like [d2g_buffered_n], except that integral values written in decimal notation
/// have all their digits.
///
/// `result` must be at least `D2M_BUFFER_LEN - 1` bytes long. Returns the number of bytes written.
pub fn d2m_buffered_n(f: f64, result: &mut [u8]) -> usize {
    write_f64(f, Notation::Minimal, result)
}

/// NUL-terminated [d2g_buffered_n]; `result` must hold `D2G_BUFFER_LEN` bytes.
pub fn d2g_buffered(f: f64, result: &mut [u8]) {
    let n = d2g_buffered_n(f, result);
    terminate(result, n);
}

/// NUL-terminated [d2d_buffered_n]; `result` must hold `D2D_BUFFER_LEN` bytes.
pub fn d2d_buffered(f: f64, result: &mut [u8]) {
    let n = d2d_buffered_n(f, result);
    terminate(result, n);
}

/// NUL-terminated [d2s_buffered_n]; `result` must hold `D2S_BUFFER_LEN` bytes.
pub fn d2s_buffered(f: f64, result: &mut [u8]) {
    let n = d2s_buffered_n(f, result);
    terminate(result, n);
}

/// NUL-terminated [d2m_buffered_n]; `result` must hold `D2M_BUFFER_LEN` bytes.
pub fn d2m_buffered(f: f64, result: &mut [u8]) {
    let n = d2m_buffered_n(f, result);
    terminate(result, n);
}

// ---------------------------------------------------------------------------------------------
// f32

/// Single-precision [d2g_buffered_n]; `result` must be at least `F2G_BUFFER_LEN - 1` bytes long.
///
/// ```
/// use blp_ryu::{f2g_buffered_n, F2G_BUFFER_LEN};
///
/// let mut buffer = [0_u8; F2G_BUFFER_LEN];
/// let n = f2g_buffered_n(1.1, &mut buffer);
/// assert_eq!(&buffer[..n], b"1.1");
/// ```
pub fn f2g_buffered_n(f: f32, result: &mut [u8]) -> usize {
    write_f32(f, Notation::General, result)
}

/// Single-precision [d2d_buffered_n]; `result` must be at least `F2D_BUFFER_LEN - 1` bytes long.
pub fn f2d_buffered_n(f: f32, result: &mut [u8]) -> usize {
    write_f32(f, Notation::Decimal, result)
}

/// Single-precision [d2s_buffered_n]; `result` must be at least `F2S_BUFFER_LEN - 1` bytes long.
pub fn f2s_buffered_n(f: f32, result: &mut [u8]) -> usize {
    write_f32(f, Notation::Scientific, result)
}

/// Single-precision [d2m_buffered_n]; `result` must be at least `F2M_BUFFER_LEN - 1` bytes long.
pub fn f2m_buffered_n(f: f32, result: &mut [u8]) -> usize {
    write_f32(f, Notation::Minimal, result)
}

pub fn f2g_buffered(f: f32, result: &mut [u8]) {
    let n = f2g_buffered_n(f, result);
    terminate(result, n);
}

pub fn f2d_buffered(f: f32, result: &mut [u8]) {
    let n = f2d_buffered_n(f, result);
    terminate(result, n);
}

pub fn f2s_buffered(f: f32, result: &mut [u8]) {
    let n = f2s_buffered_n(f, result);
    terminate(result, n);
}

pub fn f2m_buffered(f: f32, result: &mut [u8]) {
    let n = f2m_buffered_n(f, result);
    terminate(result, n);
}
