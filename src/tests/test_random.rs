// Copyright 2022 Redglyph

use std::cmp::min;
use std::str::FromStr;
use std::time::Instant;
use num::ToPrimitive;
use crate::*;
use super::render;

const ENTRY_POINTS_64: [fn(f64, &mut [u8]) -> usize; 4] = [d2g_buffered_n, d2d_buffered_n, d2s_buffered_n, d2m_buffered_n];
const ENTRY_POINTS_32: [fn(f32, &mut [u8]) -> usize; 4] = [f2g_buffered_n, f2d_buffered_n, f2s_buffered_n, f2m_buffered_n];

fn random_f64(rng: &mut oorandom::Rand64) -> f64 {
    loop {
        let f = f64::from_bits(rng.rand_u64());
        if f.is_finite() {
            return f;
        }
    }
}

fn random_f32(rng: &mut oorandom::Rand64) -> f32 {
    loop {
        let f = f32::from_bits(rng.rand_u64() as u32);
        if f.is_finite() {
            return f;
        }
    }
}

/// Number of significant digits in a `{:e}` or scientific representation.
fn significant_digits(string: &str) -> usize {
    let mantissa = string.split(|c: char| c == 'e' || c == 'E').next().unwrap_or(string);
    mantissa.bytes().filter(|b| b.is_ascii_digit()).count()
}

#[test]
fn round_trip_f64() {
    let mut rng = oorandom::Rand64::new(0);
    for i in 0..100_000 {
        let f = random_f64(&mut rng);
        for (mode, entry) in ENTRY_POINTS_64.into_iter().enumerate() {
            let res = render(f, entry);
            let f2 = f64::from_str(&res).unwrap_or_else(|_| panic!("test #{i}.{mode}: could not convert {f:e} -> '{res}' -> f64"));
            assert_eq!(f.to_bits(), f2.to_bits(), "test #{i}.{mode}: {f:e} -> '{res}'");
        }
    }
}

#[test]
fn round_trip_f32() {
    let mut rng = oorandom::Rand64::new(0);
    for i in 0..100_000 {
        let f = random_f32(&mut rng);
        for (mode, entry) in ENTRY_POINTS_32.into_iter().enumerate() {
            let res = render(f, entry);
            let f2 = f32::from_str(&res).unwrap_or_else(|_| panic!("test #{i}.{mode}: could not convert {f:e} -> '{res}' -> f32"));
            assert_eq!(f.to_bits(), f2.to_bits(), "test #{i}.{mode}: {f:e} -> '{res}'");
        }
    }
}

#[test]
fn shortest_length() {
    // the digits may differ from the standard library on ties, but never their number
    let mut rng = oorandom::Rand64::new(1);
    for i in 0..100_000 {
        let f = random_f64(&mut rng);
        let res = render(f, d2s_buffered_n);
        assert_eq!(significant_digits(&res), significant_digits(&format!("{f:e}")), "test #{i}: {f:e} -> '{res}'");
        let g = random_f32(&mut rng);
        let res = render(g, f2s_buffered_n);
        assert_eq!(significant_digits(&res), significant_digits(&format!("{g:e}")), "test #{i}: {g:e} -> '{res}'");
    }
}

#[test]
fn general_is_shortest_notation() {
    let mut rng = oorandom::Rand64::new(2);
    for i in 0..100_000 {
        let f = random_f64(&mut rng).abs();
        let general = render(f, d2g_buffered_n);
        let scientific = render(f, d2s_buffered_n);
        assert!(general.len() <= scientific.len(), "test #{i}: '{general}' longer than '{scientific}'");
        if general != scientific {
            assert!(!general.contains('e'), "test #{i}: '{general}'");
        }
    }
}

#[test]
fn deterministic() {
    let mut rng = oorandom::Rand64::new(3);
    for _ in 0..10_000 {
        let f = random_f64(&mut rng);
        for entry in ENTRY_POINTS_64 {
            assert_eq!(render(f, entry), render(f, entry));
        }
    }
}

#[test]
fn decimal_integers() {
    let mut rng = oorandom::Rand64::new(4);
    for i in 0..100_000 {
        let value = rng.rand_u64() >> rng.rand_range(0..64);
        let f = value as f64;
        let exp = (f as u128).to_string();
        let res = render(f, d2d_buffered_n);
        assert_eq!(res, exp, "test #{i}: {value}");
    }
}

/// Timing test, launch with
///
/// ```cargo test -r timing_random_d2g -- --ignored --test-threads=1 --show-output```
#[test]
#[ignore]
fn timing_random_d2g() {
    let mut rng = oorandom::Rand64::new(0);
    let timer = Instant::now();
    for i in 0..10_000_000 {
        let f = random_f64(&mut rng);
        let res = render(f, d2g_buffered_n);
        let f2 = f64::from_str(&res).unwrap_or_else(|_| panic!("test #{i}: could not convert {f:e} -> '{res}' -> f64"));
        assert_eq!(f, f2);
    }
    let elapsed = timer.elapsed();
    println!("timing_random_d2g, elapsed time: {:.3} s", elapsed.as_secs_f64());
}

/// Timing test, launch with
///
/// ```cargo test -r timing_exhaustive_f2g -- --ignored --test-threads=1 --show-output```
#[test]
#[ignore]
fn timing_exhaustive_f2g() {
    let timer = Instant::now();
    let mut buffer = [0_u8; F2G_BUFFER_LEN];
    for bits in 0..=u32::MAX {
        let f = f32::from_bits(bits);
        if !f.is_finite() {
            continue;
        }
        let n = f2g_buffered_n(f, &mut buffer);
        let res = std::str::from_utf8(&buffer[..n]).unwrap();
        let f2 = f32::from_str(res).unwrap_or_else(|_| panic!("{bits:#x}: could not convert {f:e} -> '{res}' -> f32"));
        assert_eq!(f.to_bits(), f2.to_bits(), "{bits:#x}: {f:e} -> '{res}'");
    }
    let elapsed = timer.elapsed();
    println!("timing_exhaustive_f2g, elapsed time: {:.3} s", elapsed.as_secs_f64());
}

/// Timing test, launch with
///
/// ```cargo test -r timing_digits_d2m -- --ignored --test-threads=1 --show-output```
#[test]
#[ignore]
fn timing_digits_d2m() {
    const MAX_TESTS: u64 = 2_000_000;
    const MAX_VALUE: f64 = ((1_u64 << 53) - 1) as f64;

    let mut rng = oorandom::Rand64::new(0);
    let mut low: f64 = 1.0;
    let mut high: f64 = 10.0;
    let timer = Instant::now();
    for digit in 1..=16 {
        let nbr_tests = min(MAX_TESTS, high.to_u64().unwrap() * 2 / 5);
        for _ in 0..nbr_tests {
            let value: f64 = (rng.rand_float() * (high - low) + low).trunc();
            let res = render(value, d2m_buffered_n);
            let mantissa = (value as u64).to_string();
            let trimmed = mantissa.trim_end_matches('0');
            let zeros = mantissa.len() - trimmed.len();
            // integers only fall back to scientific notation when that is strictly shorter
            if res.contains('e') {
                assert!(zeros > 5 || (trimmed.len() == 1 && zeros > 4), "{value} -> '{res}'");
            } else {
                assert_eq!(res, mantissa, "incorrect string");
            }
        }
        low = high;
        high = if digit < 15 { high * 10.0 } else { MAX_VALUE };
    }
    let elapsed = timer.elapsed();
    println!("timing_digits_d2m, elapsed time: {:.3} s", elapsed.as_secs_f64());
}
