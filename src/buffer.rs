// Copyright 2022 Redglyph
//
// Convenience layer: formatting options, a stack buffer, and the FormatInterface trait.

use std::str;
use log::{debug, trace};
use crate::double::Double;
use crate::error::FormatError;
use crate::format::{write_value, Notation, D2D_BUFFER_LEN};
use crate::single::Single;

/// Formatting options for [Buffer::format_opt] and [FormatInterface] methods
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FmtOptions {
    /// notation of the output
    pub notation: Notation,
    /// true: `1E+10`, false: `1e+10`
    pub uppercase_exponent: bool,
}

impl FmtOptions {
    pub fn new(notation: Notation) -> Self {
        FmtOptions { notation, ..FmtOptions::default() }
    }

    pub fn with_uppercase_exponent(mut self, uppercase: bool) -> Self {
        self.uppercase_exponent = uppercase;
        self
    }

    fn exp_char(&self) -> u8 {
        if self.uppercase_exponent { b'E' } else { b'e' }
    }
}

// ---------------------------------------------------------------------------------------------

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point types that can be formatted. Implemented for `f32` and `f64` only.
pub trait FormatInterface: private::Sealed + Copy {
    /// Longest representation in the given notation, without NUL terminator.
    fn max_len(notation: Notation) -> usize;

    /// Writes the value at the start of `result` and returns the number of bytes written.
    ///
    /// `result` must be at least `Self::max_len(options.notation)` bytes long.
    fn write_to(self, options: &FmtOptions, result: &mut [u8]) -> usize;

    /// Checked version of [FormatInterface::write_to]: fails without writing anything when
    /// `result` is shorter than the longest possible representation.
    fn try_write_to(self, options: &FmtOptions, result: &mut [u8]) -> Result<usize, FormatError> {
        let required = Self::max_len(options.notation);
        if result.len() < required {
            debug!("rejected {:?} output: {} bytes required, {} available", options.notation, required, result.len());
            return Err(FormatError::BufferTooSmall { required, available: result.len() });
        }
        Ok(self.write_to(options, result))
    }

    /// Formats the value with the given options into a new `String`.
    fn format_opt(self, options: &FmtOptions) -> String {
        Buffer::new().format_opt(self, options).to_string()
    }

    /// Formats the value in general notation into a new `String`.
    ///
    /// ```
    /// use blp_ryu::FormatInterface;
    ///
    /// assert_eq!(12.3456789_f64.ftoa(), "12.3456789");
    /// assert_eq!(1.5e-300_f64.ftoa(), "1.5e-300");
    /// assert_eq!((-1.5e300_f64).ftoa(), "-1.5e+300");
    /// assert_eq!(0.1_f32.ftoa(), "0.1");
    /// ```
    fn ftoa(self) -> String {
        self.format_opt(&FmtOptions::default())
    }
}

impl FormatInterface for f64 {
    fn max_len(notation: Notation) -> usize {
        notation.max_len_f64()
    }

    fn write_to(self, options: &FmtOptions, result: &mut [u8]) -> usize {
        debug_assert!(result.len() >= Self::max_len(options.notation));
        write_value(Double::from(self), options.notation, options.exp_char(), result)
    }
}

impl FormatInterface for f32 {
    fn max_len(notation: Notation) -> usize {
        notation.max_len_f32()
    }

    fn write_to(self, options: &FmtOptions, result: &mut [u8]) -> usize {
        debug_assert!(result.len() >= Self::max_len(options.notation));
        write_value(Single::from(self), options.notation, options.exp_char(), result)
    }
}

// ---------------------------------------------------------------------------------------------

/// Stack buffer large enough for any representation of `f32` and `f64` values.
///
/// ```
/// use blp_ryu::{Buffer, FmtOptions, Notation};
///
/// let mut buffer = Buffer::new();
/// assert_eq!(buffer.format(1.0e-7), "1e-07");
/// assert_eq!(buffer.format(123456789.0_f32), "123456790");
/// let options = FmtOptions::new(Notation::Decimal);
/// assert_eq!(buffer.format_opt(123456789.0_f32, &options), "123456792");
/// let options = FmtOptions::new(Notation::Scientific).with_uppercase_exponent(true);
/// assert_eq!(buffer.format_opt(-0.0, &options), "-0E+00");
/// ```
pub struct Buffer {
    bytes: [u8; D2D_BUFFER_LEN],
}

impl Buffer {
    pub fn new() -> Self {
        Buffer { bytes: [0; D2D_BUFFER_LEN] }
    }

    /// Formats `value` in general notation; the result borrows the buffer.
    pub fn format<F: FormatInterface>(&mut self, value: F) -> &str {
        self.format_opt(value, &FmtOptions::default())
    }

    pub fn format_opt<F: FormatInterface>(&mut self, value: F, options: &FmtOptions) -> &str {
        let n = value.write_to(options, &mut self.bytes);
        trace!("{:?} notation, {} bytes", options.notation, n);
        // SAFETY: the writers only emit ASCII digits, signs, '.', 'e'/'E' and the letters of
        // NaN and INF.
        unsafe { str::from_utf8_unchecked(&self.bytes[..n]) }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}
