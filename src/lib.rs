// Copyright 2022 Redglyph
//
// Shortest round-trip conversion of IEEE-754 floating-point values into decimal strings, based on
// the Ryu algorithm described in the following article:
//
//     Ulf Adams, "Ryū: fast float-to-string conversion", PLDI 2018,
//     https://dl.acm.org/doi/10.1145/3192366.3192369
//
// and on its reference implementation, found at
//
//     https://github.com/ulfjack/ryu
//
// with the following licence:
//
//     Copyright 2018 Ulf Adams
//
//     The contents of this file may be used under the terms of the Apache License,
//     Version 2.0, or the Boost Software License, Version 1.0.

//! Shortest round-trip decimal representation of `f64` and `f32` values.
//!
//! The digits written are the fewest that read back to the same value with round-to-nearest-even,
//! and the closest to the exact value among those. Four notations are available:
//!
//! * general (`d2g`, `f2g`): the shorter of decimal and scientific notation, decimal on ties,
//! * decimal (`d2d`, `f2d`): always decimal, integral values written exactly,
//! * scientific (`d2s`, `f2s`): always scientific, `d.ddde+XX`,
//! * minimal (`d2m`, `f2m`): general, but integral values written in decimal are exact.
//!
//! Special values follow the XSD 1.1 lexical space: `NaN`, `+INF`, `-INF`, `0` and `-0`.
//!
//! ```
//! use blp_ryu::{d2m_buffered_n, f2m_buffered_n, dtoa, D2M_BUFFER_LEN};
//!
//! assert_eq!(dtoa(0.1 + 0.2), "0.30000000000000004");
//! assert_eq!(dtoa(f64::MAX), "1.7976931348623157e+308");
//! assert_eq!(dtoa(f64::NEG_INFINITY), "-INF");
//!
//! let mut buffer = [0_u8; D2M_BUFFER_LEN];
//! let n = f2m_buffered_n(137438953472.0, &mut buffer);
//! assert_eq!(&buffer[..n], b"137438953472");
//! let n = d2m_buffered_n(1e23, &mut buffer);
//! assert_eq!(&buffer[..n], b"1e+23");
//! ```

mod buffer;
mod digits;
mod double;
mod error;
mod exact;
mod format;
mod maths;
mod notation;
mod single;
mod tables;

pub use crate::buffer::{Buffer, FmtOptions, FormatInterface};
pub use crate::error::FormatError;
pub use crate::format::*;

/// Class of an IEEE-754 encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Encoding {
    NaN,
    Inf,
    Zero,
    Digits,
}

// ---------------------------------------------------------------------------------------------

/// Converts the given double-precision number into its shortest decimal form, in general
/// notation.
///
/// ```
/// use blp_ryu::dtoa;
///
/// assert_eq!(dtoa(12.3456789), "12.3456789");
/// assert_eq!(dtoa(1.5e-300), "1.5e-300");
/// assert_eq!(dtoa(-1.5e300), "-1.5e+300");
/// assert_eq!(dtoa(100.0), "100");
/// ```
///
/// The output is optimal, i.e. the output string
///  1. rounds back to the input number when read in (using round-to-nearest-even)
///  2. is as short as possible,
///  3. is as close to the input number as possible.
pub fn dtoa(value: f64) -> String {
    value.ftoa()
}

/// Converts the given single-precision number into its shortest decimal form, in general
/// notation.
///
/// ```
/// use blp_ryu::ftoa;
///
/// assert_eq!(ftoa(1.1), "1.1");
/// assert_eq!(ftoa(f32::MIN_POSITIVE), "1.1754944e-38");
/// ```
pub fn ftoa(value: f32) -> String {
    value.ftoa()
}
