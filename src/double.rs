// Copyright 2022 Redglyph
//
// IEEE-754 double precision: decoding and shortest decimal representation (Ryu).

use crate::Encoding;
use crate::maths::*;
use crate::tables::*;

// ---------------------------------------------------------------------------------------------
// IEEE-754 double precision:
//
// - bit 63: sign, 0 = positive, 1 = negative
// - bits 62-52: exponent (11 bits),
// - bits 51-00: fraction (52 bits) of 53-bit normalized significand (MSB "hidden" since always '1')
//
// finite value = -1 ^ sign * (1.fraction) * 2 ^ (e - 1023)

type BitsType = u64;

pub(crate) const DOUBLE_MANTISSA_BITS: u32 = 52;
pub(crate) const DOUBLE_EXPONENT_BITS: u32 = 11;
const DOUBLE_BIAS: i32 = 1023;

const HIDDEN_BIT: BitsType = 1 << DOUBLE_MANTISSA_BITS;
const FRACTION_MASK: BitsType = HIDDEN_BIT - 1;
const MAX_IEEE_EXPONENT: u32 = (1 << DOUBLE_EXPONENT_BITS) - 1;

#[derive(Clone, Copy, Debug)]
/// IEEE-754 double-precision floating-point value
pub(crate) struct Double {
    bits: BitsType
}

impl Double {
    /// Creates a new [Double] value from the IEEE-754 binary encoding
    pub(crate) fn new(bits: BitsType) -> Self {
        Double { bits }
    }

    /// Fraction component (significand without its hidden MSB)
    pub(crate) fn ieee_mantissa(&self) -> u64 {
        self.bits & FRACTION_MASK
    }

    /// Biased exponent component
    pub(crate) fn ieee_exponent(&self) -> u32 {
        (self.bits >> DOUBLE_MANTISSA_BITS) as u32 & MAX_IEEE_EXPONENT
    }

    /// Sign: false = positive, true = negative
    pub(crate) fn sign(&self) -> bool {
        (self.bits >> (DOUBLE_MANTISSA_BITS + DOUBLE_EXPONENT_BITS)) & 1 != 0
    }

    /// Encoding class (zero, finite, inf or nan)
    pub(crate) fn encoding(&self) -> Encoding {
        match (self.ieee_exponent(), self.ieee_mantissa()) {
            (0, 0) => Encoding::Zero,
            (MAX_IEEE_EXPONENT, 0) => Encoding::Inf,
            (MAX_IEEE_EXPONENT, _) => Encoding::NaN,
            _ => Encoding::Digits,
        }
    }

    /// Shortest decimal representation of a non-zero finite value, using the small-integer
    /// shortcut when it applies.
    pub(crate) fn shortest(&self) -> FloatingDecimal64 {
        let (mantissa, exponent) = (self.ieee_mantissa(), self.ieee_exponent());
        match d2d_small_int(mantissa, exponent) {
            Some(v) => v.without_trailing_zeros(),
            None => d2d(mantissa, exponent),
        }
    }

    /// If the value is an integer, returns it as `(m, shift)` meaning `m * 2^shift`.
    pub(crate) fn integral_value(&self) -> Option<(u64, u32)> {
        let ieee_exponent = self.ieee_exponent();
        if ieee_exponent == 0 {
            // zero or subnormal: never a non-zero integer
            return None;
        }
        let m2 = HIDDEN_BIT | self.ieee_mantissa();
        let e2 = ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32;
        if e2 >= 0 {
            Some((m2, e2 as u32))
        } else if e2 >= -(DOUBLE_MANTISSA_BITS as i32) && multiple_of_pow2_64(m2, -e2 as u32) {
            Some((m2 >> -e2, 0))
        } else {
            None
        }
    }
}

impl From<f64> for Double {
    fn from(f: f64) -> Self {
        Double::new(f.to_bits())
    }
}

// ---------------------------------------------------------------------------------------------

/// Decimal representation `mantissa` * 10^`exponent`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FloatingDecimal64 {
    pub mantissa: u64,  // num_digits <= 17
    pub exponent: i32,
}

impl FloatingDecimal64 {
    /// Moves the trailing decimal zeros of the mantissa into the exponent.
    fn without_trailing_zeros(mut self) -> Self {
        debug_assert!(self.mantissa != 0);
        while self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.exponent += 1;
        }
        self
    }
}

/// Exact conversion of integers in `[1, 2^53)`: returns `None` when the value has a fractional
/// part or is too large to be handled that way.
pub(crate) fn d2d_small_int(ieee_mantissa: u64, ieee_exponent: u32) -> Option<FloatingDecimal64> {
    let m2 = HIDDEN_BIT | ieee_mantissa;
    let e2 = ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32;

    if e2 > 0 {
        // f = m2 * 2^e2 >= 2^53 is an integer, left to the general algorithm
        return None;
    }
    if e2 < -(DOUBLE_MANTISSA_BITS as i32) {
        // f < 1
        return None;
    }
    if !multiple_of_pow2_64(m2, -e2 as u32) {
        return None;
    }
    Some(FloatingDecimal64 { mantissa: m2 >> -e2, exponent: 0 })
}

/// Shortest decimal representation of the non-zero finite value given by its IEEE-754 fields.
///
/// The result `mantissa * 10^exponent`
///  1. rounds back to the input number when read in (using round-to-nearest-even),
///  2. has as few digits as possible,
///  3. is as close to the input number as possible; exact ties select an even last digit.
pub(crate) fn d2d(ieee_mantissa: u64, ieee_exponent: u32) -> FloatingDecimal64 {
    let (e2, m2) = if ieee_exponent == 0 {
        // We subtract 2 so that the bounds computation has 2 additional bits.
        (1 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2, ieee_mantissa)
    } else {
        (ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2, HIDDEN_BIT | ieee_mantissa)
    };
    let accept_bounds = m2 & 1 == 0;

    // Interval of legal decimal representations, scaled by 4.
    let mv = 4 * m2;
    let mp = mv + 2;
    // The lower boundary is closer when the predecessor is in the binade below.
    let mm_shift = u64::from(ieee_mantissa != 0 || ieee_exponent <= 1);
    let mm = mv - 1 - mm_shift;

    // Conversion to a decimal power base.
    let e10: i32;
    let mut vr: u64;
    let mut vp: u64;
    let mut vm: u64;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;
    if e2 >= 0 {
        // Slightly faster than max(0, log10_pow2(e2) - 1).
        let q = log10_pow2(e2) - u32::from(e2 > 3);
        e10 = q as i32;
        let k = DOUBLE_POW5_INV_BITCOUNT + pow5bits(q as i32) - 1;
        let i = (-e2 + q as i32 + k) as u32;
        let mul = compute_inv_pow5(q);
        vr = mul_shift_64(mv, mul, i);
        vp = mul_shift_64(mp, mul, i);
        vm = mul_shift_64(mm, mul, i);
        if q <= 21 {
            // Only one of mp, mv, and mm can be a multiple of 5, if any.
            if mv % 5 == 0 {
                vr_is_trailing_zeros = multiple_of_pow5_64(mv, q);
            } else if accept_bounds {
                // e2 >= q, so only the power of 5 matters for mm
                vm_is_trailing_zeros = multiple_of_pow5_64(mm, q);
            } else {
                vp -= u64::from(multiple_of_pow5_64(mp, q));
            }
        }
    } else {
        // Slightly faster than max(0, log10_pow5(-e2) - 1).
        let q = log10_pow5(-e2) - u32::from(-e2 > 1);
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = pow5bits(i) - DOUBLE_POW5_BITCOUNT;
        let j = (q as i32 - k) as u32;
        let mul = compute_pow5(i as u32);
        vr = mul_shift_64(mv, mul, j);
        vp = mul_shift_64(mp, mul, j);
        vm = mul_shift_64(mm, mul, j);
        if q <= 1 {
            // {vr,vp,vm} is trailing zeros if {mv,mp,mm} has at least q trailing 0 bits.
            // mv = 4 * m2, so it always has at least two trailing 0 bits.
            vr_is_trailing_zeros = true;
            if accept_bounds {
                // mm = mv - 1 - mm_shift has 1 trailing 0 bit iff mm_shift == 1
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                // mp = mv + 2 always has at least one trailing 0 bit
                vp -= 1;
            }
        } else if q < 63 {
            // -e2 >= q, so only the trailing 0 bits of mv matter
            vr_is_trailing_zeros = multiple_of_pow2_64(mv, q - 1);
        }
    }

    // Shortest representation in the interval.
    let mut removed = 0_i32;
    let output = if vm_is_trailing_zeros || vr_is_trailing_zeros {
        // General case, rare (~0.7%).
        let mut last_removed_digit = 0_u8;
        while vp / 10 > vm / 10 {
            vm_is_trailing_zeros &= vm % 10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = (vr % 10) as u8;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        if vm_is_trailing_zeros {
            while vm % 10 == 0 {
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = (vr % 10) as u8;
                vr /= 10;
                vp /= 10;
                vm /= 10;
                removed += 1;
            }
        }
        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // Round even if the exact number is .....50..0.
            last_removed_digit = 4;
        }
        // vr + 1 if vr is outside bounds or if we need to round up
        vr + u64::from((vr == vm && (!accept_bounds || !vm_is_trailing_zeros)) || last_removed_digit >= 5)
    } else {
        // Common case.
        let mut round_up = false;
        // Two digits at a time first (~86.2%).
        if vp / 100 > vm / 100 {
            round_up = vr % 100 >= 50;
            vr /= 100;
            vp /= 100;
            vm /= 100;
            removed += 2;
        }
        while vp / 10 > vm / 10 {
            round_up = vr % 10 >= 5;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        vr + u64::from(vr == vm || round_up)
    };

    FloatingDecimal64 {
        mantissa: output,
        exponent: e10 + removed,
    }
}
