use rug::Integer;

use super::error::{FactorialError, InvalidReason};

fn check_range(n: &Integer) -> Result<u32, InvalidReason> {
    if n.is_negative() {
        return Err(InvalidReason::Negative);
    }
    n.to_u32().ok_or(InvalidReason::TooLarge)
}

/// Checks that `n` is usable as a factorial count, i.e. lies in
/// `0..=u32::MAX`.
pub fn validate_count(n: &Integer) -> Result<u32, FactorialError> {
    check_range(n).map_err(|reason| FactorialError::invalid(n.to_string(), reason))
}

fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses untrusted text into a factorial count.
///
/// Only an optional sign followed by ASCII digits is accepted (surrounding
/// whitespace aside). `rug` would also take embedded whitespace and
/// underscores, so the shape is checked before handing it over.
pub fn parse_count(input: &str) -> Result<u32, FactorialError> {
    let s = input.trim();
    if !looks_numeric(s) {
        return Err(FactorialError::invalid(input, InvalidReason::NotANumber));
    }
    let n = s
        .parse::<Integer>()
        .map_err(|_| FactorialError::invalid(input, InvalidReason::NotANumber))?;
    check_range(&n).map_err(|reason| FactorialError::invalid(input, reason))
}

#[test]
fn parse_count_accepts() {
    macro_rules! y {
        ($s:expr, $n:expr) => {
            assert_eq!(parse_count($s), Ok($n))
        };
    }

    y!("0", 0);
    y!("5", 5);
    y!(" 7 ", 7);
    y!("+3", 3);
    y!("-0", 0);
    y!("007", 7);
    y!("4294967295", u32::MAX);
}

#[test]
fn parse_count_rejects() {
    macro_rules! n {
        ($s:expr, $r:expr) => {
            assert_eq!(parse_count($s), Err(FactorialError::invalid($s, $r)))
        };
    }

    n!("", InvalidReason::NotANumber);
    n!("   ", InvalidReason::NotANumber);
    n!("abc", InvalidReason::NotANumber);
    n!("1.5", InvalidReason::NotANumber);
    n!("1_000", InvalidReason::NotANumber);
    n!("1 000", InvalidReason::NotANumber);
    n!("0x10", InvalidReason::NotANumber);
    n!("+-1", InvalidReason::NotANumber);
    n!("-", InvalidReason::NotANumber);
    n!("-1", InvalidReason::Negative);
    n!("-99999999999999999999", InvalidReason::Negative);
    n!("4294967296", InvalidReason::TooLarge);
    n!("123456789012345678901234567890", InvalidReason::TooLarge);
}

#[test]
fn validate_count_range() {
    assert_eq!(validate_count(&Integer::from(12)), Ok(12));
    assert_eq!(
        validate_count(&Integer::from(-1)),
        Err(FactorialError::invalid("-1", InvalidReason::Negative))
    );
    assert_eq!(
        validate_count(&Integer::from(u64::MAX)),
        Err(FactorialError::invalid("18446744073709551615", InvalidReason::TooLarge))
    );
}
