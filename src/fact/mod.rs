mod count;
mod error;
mod estimate;

use std::fmt::Write;

use az::{Az, CheckedAs};
use rug::{Complete, Integer};

pub use count::{parse_count, validate_count};
pub use error::{FactorialError, InvalidReason};
pub use estimate::{digits_for_bits, estimated_digits, Limits, DEFAULT_MAX_DIGITS};

/// An exactly computed `n!`. The GMP value is released on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorial {
    n: u32,
    value: Integer,
}

impl Factorial {
    pub fn compute(n: u32, limits: &Limits) -> Result<Self, FactorialError> {
        let estimate = limits.check(n)?;
        let value = Integer::factorial(n).complete();
        tracing::debug!(
            n,
            estimate,
            bits = value.significant_bits().az::<u64>(),
            "computed factorial"
        );
        Ok(Self { n, value })
    }

    pub fn count(&self) -> u32 {
        self.n
    }

    pub fn value(&self) -> &Integer {
        &self.value
    }

    pub fn into_inner(self) -> Integer {
        self.value
    }

    /// Bytes reserved for the decimal rendering, derived from the bit length
    /// of the value so it grows with `n`.
    pub fn decimal_capacity(&self) -> u64 {
        digits_for_bits(self.value.significant_bits().az::<u64>())
    }

    pub fn to_decimal(&self) -> Result<String, FactorialError> {
        let digits = self.decimal_capacity();
        let oom = || FactorialError::OutOfMemory {
            n: self.n,
            digits,
            max_digits: None,
        };
        let capacity = digits.checked_as::<usize>().ok_or_else(oom)?;
        let mut s = String::new();
        s.try_reserve_exact(capacity).map_err(|_| oom())?;
        write!(s, "{}", self.value).map_err(|_| oom())?;
        Ok(s)
    }
}

impl std::fmt::Display for Factorial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

pub fn compute_factorial_with(
    n: impl Into<Integer>,
    limits: &Limits,
) -> Result<String, FactorialError> {
    let n = validate_count(&n.into())?;
    Factorial::compute(n, limits)?.to_decimal()
}

/// Exact decimal digits of `n!`. Fails with `InvalidArgument` when `n` is
/// negative or above `u32::MAX`, and with `OutOfMemory` when the result is
/// over the default [`Limits`].
pub fn compute_factorial(n: impl Into<Integer>) -> Result<String, FactorialError> {
    compute_factorial_with(n, &Limits::default())
}

pub fn compute_factorial_str_with(input: &str, limits: &Limits) -> Result<String, FactorialError> {
    let n = parse_count(input)?;
    Factorial::compute(n, limits)?.to_decimal()
}

pub fn compute_factorial_str(input: &str) -> Result<String, FactorialError> {
    compute_factorial_str_with(input, &Limits::default())
}

#[cfg(test)]
fn get_rng() -> impl rand::Rng {
    use rand::{rngs::StdRng, SeedableRng};
    StdRng::seed_from_u64(0x909090)
}

#[test]
fn known_values() {
    macro_rules! y {
        ($n:expr, $s:expr) => {
            assert_eq!(compute_factorial($n).as_deref(), Ok($s))
        };
    }

    y!(0, "1");
    y!(1, "1");
    y!(2, "2");
    y!(5, "120");
    y!(10, "3628800");
    y!(12, "479001600");
    y!(13, "6227020800");
    y!(20, "2432902008176640000");
    y!(21, "51090942171709440000");
    y!(
        30,
        "265252859812191058636308480000000"
    );
    y!(0u8, "1");
    y!(5u64, "120");
    y!(5i128, "120");
}

#[test]
fn hundred_factorial() {
    let s = compute_factorial(100).unwrap();
    assert_eq!(s.len(), 158);
    assert!(s.starts_with("93326215443944152681699238856266700490715968264381621468"));
    assert!(s.ends_with(&"0".repeat(24)));
}

#[test]
fn rejects_out_of_range() {
    assert_eq!(
        compute_factorial(-1),
        Err(FactorialError::invalid("-1", InvalidReason::Negative))
    );
    assert_eq!(
        compute_factorial(i64::MIN),
        Err(FactorialError::invalid(i64::MIN.to_string(), InvalidReason::Negative))
    );
    assert_eq!(
        compute_factorial(u64::from(u32::MAX) + 1),
        Err(FactorialError::invalid("4294967296", InvalidReason::TooLarge))
    );
}

#[test]
fn rejects_bad_text() {
    assert!(compute_factorial_str("abc").unwrap_err().is_invalid_argument());
    assert!(compute_factorial_str("-5").unwrap_err().is_invalid_argument());
    assert!(compute_factorial_str("").unwrap_err().is_invalid_argument());
    assert_eq!(compute_factorial_str(" 10\n").as_deref(), Ok("3628800"));
}

#[test]
fn limit_refuses_before_computing() {
    let limits = Limits::new(10);
    assert_eq!(compute_factorial_with(13, &limits).as_deref(), Ok("6227020800"));
    assert_eq!(
        compute_factorial_with(14, &limits),
        Err(FactorialError::OutOfMemory {
            n: 14,
            digits: 11,
            max_digits: Some(10)
        })
    );
    assert!(compute_factorial(u32::MAX).unwrap_err().is_out_of_memory());
    assert!(compute_factorial_str_with("100", &limits)
        .unwrap_err()
        .is_out_of_memory());
}

#[test]
fn capacity_covers_output() {
    for n in [0, 1, 2, 3, 9, 10, 25, 99, 100, 101, 1000, 4096] {
        let f = Factorial::compute(n, &Limits::default()).unwrap();
        let s = f.to_decimal().unwrap();
        assert!(s.len() as u64 <= f.decimal_capacity(), "n = {n}");
        assert!(s.capacity() as u64 >= f.decimal_capacity(), "n = {n}");
        assert_eq!(s, f.to_string());
        assert_eq!(f.count(), n);
    }
}

#[test]
fn only_digits() {
    use rand::Rng;
    let mut rng = get_rng();
    for _ in 0..50 {
        let n: u32 = rng.gen_range(0..3000);
        let s = compute_factorial(n).unwrap();
        assert!(!s.is_empty());
        assert!(s.bytes().all(|b| b.is_ascii_digit()), "n = {n}");
        assert!(!s.starts_with('0') || s == "0");
    }
}

#[test]
fn monotonic_and_growing() {
    let mut prev: Option<(Integer, usize)> = None;
    for n in 0..=400u32 {
        let s = compute_factorial(n).unwrap();
        let v = s.parse::<Integer>().unwrap();
        if let Some((pv, plen)) = &prev {
            if n >= 2 {
                assert!(v > *pv, "{n}! not above {}!", n - 1);
            } else {
                assert!(v >= *pv);
            }
            assert!(s.len() >= *plen, "n = {n}");
        }
        prev = Some((v, s.len()));
    }
}

#[test]
fn estimate_tracks_actual() {
    use rand::Rng;
    let mut rng = get_rng();
    let ns = (0..=300u32).chain((0..20).map(|_| rng.gen_range(300..20_000)));
    for n in ns {
        let actual = compute_factorial(n).unwrap().len() as u64;
        let est = estimated_digits(n);
        assert!(est >= actual && est <= actual + 1, "n = {n}: {est} vs {actual}");
    }
}

#[test]
fn matches_product() {
    let mut acc = Integer::from(1);
    for n in 1..=60u32 {
        acc *= n;
        let f = Factorial::compute(n, &Limits::default()).unwrap();
        assert_eq!(f.value(), &acc);
        assert_eq!(f.into_inner(), acc);
    }
}
