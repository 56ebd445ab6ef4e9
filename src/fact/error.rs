use std::error::Error;

use crate::bytes::fmt_bibytes;

/// Why an argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NotANumber,
    Negative,
    /// Larger than the biggest count GMP's factorial accepts (`u32::MAX`).
    TooLarge,
    /// Wrong number of command-line arguments; holds how many were given.
    ArgCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactorialError {
    InvalidArgument {
        input: String,
        reason: InvalidReason,
    },
    /// The result would not fit in the memory budget (`max_digits` is the
    /// budget), or its buffer could not be allocated (`max_digits` is `None`).
    OutOfMemory {
        n: u32,
        digits: u64,
        max_digits: Option<u64>,
    },
}

impl FactorialError {
    pub fn invalid(input: impl Into<String>, reason: InvalidReason) -> Self {
        Self::InvalidArgument {
            input: input.into(),
            reason,
        }
    }

    pub fn arg_count(given: usize) -> Self {
        Self::invalid(String::new(), InvalidReason::ArgCount(given))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

impl Error for FactorialError {}
impl std::fmt::Display for FactorialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactorialError::InvalidArgument { input, reason } => match reason {
                InvalidReason::NotANumber => write!(f, "invalid argument {input:?}: not a number"),
                InvalidReason::Negative => {
                    write!(f, "invalid argument {input:?}: factorial of a negative number")
                }
                InvalidReason::TooLarge => write!(
                    f,
                    "invalid argument {input:?}: larger than the maximum count {}",
                    u32::MAX
                ),
                InvalidReason::ArgCount(given) => {
                    write!(f, "invalid arguments: expected exactly 1, got {given}")
                }
            },
            FactorialError::OutOfMemory {
                n,
                digits,
                max_digits: Some(max),
            } => write!(
                f,
                "out of memory: {n}! has about {digits} digits ({}), over the limit of {max} ({})",
                fmt_bibytes(*digits),
                fmt_bibytes(*max)
            ),
            FactorialError::OutOfMemory {
                n,
                digits,
                max_digits: None,
            } => write!(
                f,
                "out of memory: could not allocate {} for the {digits} digits of {n}!",
                fmt_bibytes(*digits)
            ),
        }
    }
}

#[test]
fn error_messages() {
    assert_eq!(
        FactorialError::invalid("abc", InvalidReason::NotANumber).to_string(),
        r#"invalid argument "abc": not a number"#
    );
    assert_eq!(
        FactorialError::invalid("-4", InvalidReason::Negative).to_string(),
        r#"invalid argument "-4": factorial of a negative number"#
    );
    assert_eq!(
        FactorialError::arg_count(3).to_string(),
        "invalid arguments: expected exactly 1, got 3"
    );
    assert_eq!(
        FactorialError::OutOfMemory {
            n: 100,
            digits: 158,
            max_digits: Some(1024)
        }
        .to_string(),
        "out of memory: 100! has about 158 digits (158B), over the limit of 1024 (1KiB)"
    );
    assert_eq!(
        FactorialError::OutOfMemory {
            n: 7,
            digits: 3 << 20,
            max_digits: None
        }
        .to_string(),
        "out of memory: could not allocate 3MiB for the 3145728 digits of 7!"
    );
    assert!(FactorialError::arg_count(0).is_invalid_argument());
    assert!(!FactorialError::arg_count(0).is_out_of_memory());
}
