use std::f64::consts::{LN_10, LOG10_2, PI};

use az::{Az, SaturatingAs};

use super::error::FactorialError;

#[cfg(not(fuzzing))]
pub const DEFAULT_MAX_DIGITS: u64 = 1 << 28;
#[cfg(fuzzing)]
pub const DEFAULT_MAX_DIGITS: u64 = 100_000;

/// Upper bound on the number of decimal digits of `n!`.
///
/// Uses Stirling's series cut after the `1/(12n)` term, which never
/// undershoots `ln n!`. For every `n` it is at most one above the real
/// digit count.
pub fn estimated_digits(n: u32) -> u64 {
    if n < 2 {
        return 1;
    }
    let x = n.az::<f64>();
    let ln_fact = x * x.ln() - x + 0.5 * (2. * PI * x).ln() + 1. / (12. * x);
    (ln_fact / LN_10).floor().saturating_as::<u64>() + 1
}

/// Decimal digits needed to print a non-negative integer of `bits`
/// significant bits, plus one spare for float rounding.
pub fn digits_for_bits(bits: u64) -> u64 {
    (bits.az::<f64>() * LOG10_2).floor().saturating_as::<u64>() + 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_digits: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
        }
    }
}

impl Limits {
    pub fn new(max_digits: u64) -> Self {
        Self { max_digits }
    }

    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Refuses `n` up front if its factorial would not fit.
    pub fn check(&self, n: u32) -> Result<u64, FactorialError> {
        let digits = estimated_digits(n);
        if digits > self.max_digits {
            tracing::warn!(n, digits, max_digits = self.max_digits, "refusing factorial over limit");
            return Err(FactorialError::OutOfMemory {
                n,
                digits,
                max_digits: Some(self.max_digits),
            });
        }
        Ok(digits)
    }
}

#[test]
fn estimate_small() {
    macro_rules! y {
        ($n:expr, $d:expr) => {
            assert_eq!(estimated_digits($n), $d)
        };
    }

    y!(0, 1);
    y!(1, 1);
    y!(2, 1);
    y!(3, 1);
    y!(4, 2);
    y!(5, 3);
    y!(10, 7);
    y!(20, 19);
    y!(100, 158);
}

#[test]
fn estimate_large_is_sane() {
    // 10^6! has 5_565_709 digits.
    let d = estimated_digits(1_000_000);
    assert!((5_565_709..=5_565_710).contains(&d), "{d}");
    // u32::MAX! is ~3.9e10 digits; must not saturate or overflow.
    let big = estimated_digits(u32::MAX);
    assert!(big > 30_000_000_000 && big < 50_000_000_000, "{big}");
}

#[test]
fn bits_to_digits() {
    assert_eq!(digits_for_bits(0), 2);
    assert_eq!(digits_for_bits(1), 2);
    // 2^64 - 1 has 20 digits.
    assert!(digits_for_bits(64) >= 20);
    assert!(digits_for_bits(64) <= 21);
}

#[test]
fn limits_check() {
    let l = Limits::new(100);
    assert_eq!(l.check(50), Ok(65));
    assert_eq!(
        l.check(100),
        Err(FactorialError::OutOfMemory {
            n: 100,
            digits: 158,
            max_digits: Some(100)
        })
    );
    assert!(Limits::unlimited().check(u32::MAX).is_ok());
    assert!(Limits::default().check(u32::MAX).is_err());
}
