use core::fmt;

/// Error type for the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input string did not match the decimal grammar
    /// `(-)?(\d+)(\.\d+)?([eE](-)?\d+)?`. Carries the offending input.
    InvalidDecimal(String),
    /// The divisor had zero magnitude.
    DivisionByZero,
    /// A division precision of zero digits was requested.
    InvalidPrecision,
    /// `Num::from_str_radix` was called with a radix other than 10.
    UnsupportedRadix(u32),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidDecimal(ref input) => write!(f, "Invalid decimal: {}", input),
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::InvalidPrecision => write!(f, "Division precision must be positive"),
            Self::UnsupportedRadix(radix) => {
                write!(f, "Unsupported radix {}: only radix 10 is available", radix)
            }
        }
    }
}
