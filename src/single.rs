// Copyright 2022 Redglyph
//
// IEEE-754 single precision: decoding and shortest decimal representation (Ryu).

use crate::Encoding;
use crate::maths::*;
use crate::tables::*;

// ---------------------------------------------------------------------------------------------
// IEEE-754 single precision:
//
// - bit 31: sign, 0 = positive, 1 = negative
// - bits 30-23: exponent (8 bits),
// - bits 22-00: fraction (23 bits) of 24-bit normalized significand
//
// finite value = -1 ^ sign * (1.fraction) * 2 ^ (e - 127)

type BitsType = u32;

pub(crate) const FLOAT_MANTISSA_BITS: u32 = 23;
pub(crate) const FLOAT_EXPONENT_BITS: u32 = 8;
const FLOAT_BIAS: i32 = 127;

const HIDDEN_BIT: BitsType = 1 << FLOAT_MANTISSA_BITS;
const FRACTION_MASK: BitsType = HIDDEN_BIT - 1;
const MAX_IEEE_EXPONENT: u32 = (1 << FLOAT_EXPONENT_BITS) - 1;

#[derive(Clone, Copy, Debug)]
/// IEEE-754 single-precision floating-point value
pub(crate) struct Single {
    bits: BitsType
}

impl Single {
    pub(crate) fn new(bits: BitsType) -> Self {
        Single { bits }
    }

    pub(crate) fn ieee_mantissa(&self) -> u32 {
        self.bits & FRACTION_MASK
    }

    pub(crate) fn ieee_exponent(&self) -> u32 {
        (self.bits >> FLOAT_MANTISSA_BITS) & MAX_IEEE_EXPONENT
    }

    pub(crate) fn sign(&self) -> bool {
        (self.bits >> (FLOAT_MANTISSA_BITS + FLOAT_EXPONENT_BITS)) & 1 != 0
    }

    pub(crate) fn encoding(&self) -> Encoding {
        match (self.ieee_exponent(), self.ieee_mantissa()) {
            (0, 0) => Encoding::Zero,
            (MAX_IEEE_EXPONENT, 0) => Encoding::Inf,
            (MAX_IEEE_EXPONENT, _) => Encoding::NaN,
            _ => Encoding::Digits,
        }
    }

    pub(crate) fn shortest(&self) -> FloatingDecimal32 {
        let (mantissa, exponent) = (self.ieee_mantissa(), self.ieee_exponent());
        match f2d_small_int(mantissa, exponent) {
            Some(v) => v.without_trailing_zeros(),
            None => f2d(mantissa, exponent),
        }
    }

    /// If the value is an integer, returns it as `(m, shift)` meaning `m * 2^shift`.
    pub(crate) fn integral_value(&self) -> Option<(u64, u32)> {
        let ieee_exponent = self.ieee_exponent();
        if ieee_exponent == 0 {
            return None;
        }
        let m2 = HIDDEN_BIT | self.ieee_mantissa();
        let e2 = ieee_exponent as i32 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32;
        if e2 >= 0 {
            Some((m2 as u64, e2 as u32))
        } else if e2 >= -(FLOAT_MANTISSA_BITS as i32) && multiple_of_pow2_32(m2, -e2 as u32) {
            Some(((m2 >> -e2) as u64, 0))
        } else {
            None
        }
    }
}

impl From<f32> for Single {
    fn from(f: f32) -> Self {
        Single::new(f.to_bits())
    }
}

// ---------------------------------------------------------------------------------------------

/// Decimal representation `mantissa` * 10^`exponent`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FloatingDecimal32 {
    pub mantissa: u32,  // num_digits <= 9
    pub exponent: i32,
}

impl FloatingDecimal32 {
    fn without_trailing_zeros(mut self) -> Self {
        debug_assert!(self.mantissa != 0);
        while self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.exponent += 1;
        }
        self
    }
}

/// Exact conversion of integers in `[1, 2^24)`.
pub(crate) fn f2d_small_int(ieee_mantissa: u32, ieee_exponent: u32) -> Option<FloatingDecimal32> {
    let m2 = HIDDEN_BIT | ieee_mantissa;
    let e2 = ieee_exponent as i32 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32;
    if e2 > 0 || e2 < -(FLOAT_MANTISSA_BITS as i32) {
        return None;
    }
    if !multiple_of_pow2_32(m2, -e2 as u32) {
        return None;
    }
    Some(FloatingDecimal32 { mantissa: m2 >> -e2, exponent: 0 })
}

/// Shortest decimal representation of the non-zero finite value given by its IEEE-754 fields.
pub(crate) fn f2d(ieee_mantissa: u32, ieee_exponent: u32) -> FloatingDecimal32 {
    let (e2, m2) = if ieee_exponent == 0 {
        // We subtract 2 so that the bounds computation has 2 additional bits.
        (1 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32 - 2, ieee_mantissa)
    } else {
        (ieee_exponent as i32 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32 - 2, HIDDEN_BIT | ieee_mantissa)
    };
    let accept_bounds = m2 & 1 == 0;

    let mv = 4 * m2;
    let mp = mv + 2;
    let mm_shift = u32::from(ieee_mantissa != 0 || ieee_exponent <= 1);
    let mm = mv - 1 - mm_shift;

    let e10: i32;
    let mut vr: u32;
    let mut vp: u32;
    let mut vm: u32;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;
    let mut last_removed_digit = 0_u8;
    if e2 >= 0 {
        let q = log10_pow2(e2);
        e10 = q as i32;
        let k = FLOAT_POW5_INV_BITCOUNT + pow5bits(q as i32) - 1;
        let i = -e2 + q as i32 + k;
        let factor = float_inv_pow5(q);
        vr = mul_shift_32(mv, factor, i);
        vp = mul_shift_32(mp, factor, i);
        vm = mul_shift_32(mm, factor, i);
        if q != 0 && (vp - 1) / 10 <= vm / 10 {
            // We need to know one removed digit even if we are not going to loop below.
            let l = FLOAT_POW5_INV_BITCOUNT + pow5bits(q as i32 - 1) - 1;
            let digits = mul_shift_32(mv, float_inv_pow5(q - 1), -e2 + q as i32 - 1 + l);
            last_removed_digit = (digits % 10) as u8;
        }
        if q <= 9 {
            // Only one of mp, mv, and mm can be a multiple of 5, if any.
            if mv % 5 == 0 {
                vr_is_trailing_zeros = multiple_of_pow5_32(mv, q);
            } else if accept_bounds {
                vm_is_trailing_zeros = multiple_of_pow5_32(mm, q);
            } else {
                vp -= u32::from(multiple_of_pow5_32(mp, q));
            }
        }
    } else {
        let q = log10_pow5(-e2);
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = pow5bits(i) - FLOAT_POW5_BITCOUNT;
        let j = q as i32 - k;
        let factor = float_pow5(i as u32);
        vr = mul_shift_32(mv, factor, j);
        vp = mul_shift_32(mp, factor, j);
        vm = mul_shift_32(mm, factor, j);
        if q != 0 && (vp - 1) / 10 <= vm / 10 {
            let j = q as i32 - 1 - (pow5bits(i + 1) - FLOAT_POW5_BITCOUNT);
            let digits = mul_shift_32(mv, float_pow5(i as u32 + 1), j);
            last_removed_digit = (digits % 10) as u8;
        }
        if q <= 1 {
            // mv = 4 * m2, so it always has at least two trailing 0 bits.
            vr_is_trailing_zeros = true;
            if accept_bounds {
                // mm = mv - 1 - mm_shift has 1 trailing 0 bit iff mm_shift == 1
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                vp -= 1;
            }
        } else if q < 31 {
            vr_is_trailing_zeros = multiple_of_pow2_32(mv, q - 1);
        }
    }

    let mut removed = 0_i32;
    let output = if vm_is_trailing_zeros || vr_is_trailing_zeros {
        // General case (~4.0%).
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
        vr + u32::from((vr == vm && (!accept_bounds || !vm_is_trailing_zeros)) || last_removed_digit >= 5)
    } else {
        while vp / 10 > vm / 10 {
            last_removed_digit = (vr % 10) as u8;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        vr + u32::from(vr == vm || last_removed_digit >= 5)
    };

    FloatingDecimal32 {
        mantissa: output,
        exponent: e10 + removed,
    }
}
