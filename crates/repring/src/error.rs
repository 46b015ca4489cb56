use std::fmt;

pub type Result<T> = std::result::Result<T, RingError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// The character table text is missing lines, has rows of the wrong length or is internally
    /// inconsistent. `line` is 1-based.
    MalformedTable { line: usize, reason: String },
    /// An inner product whose numerator is not divisible by the group order. Only raised under
    /// [`IntegralityPolicy::Strict`](crate::IntegralityPolicy::Strict).
    NonIntegralInnerProduct { numerator: i64, size: i64 },
    InvalidExponent(i32),
    Overflow,
    LengthMismatch { expected: usize, found: usize },
    IncompatibleTable { required: usize, classes: usize },
    TableNotFound(String),
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTable { line, reason } => {
                write!(f, "Malformed character table at line {line}: {reason}")
            }
            Self::NonIntegralInnerProduct { numerator, size } => write!(
                f,
                "Inner product {numerator}/{size} is not integral; operand is not a virtual character"
            ),
            Self::InvalidExponent(n) => write!(f, "Invalid exponent {n}: must be non-negative"),
            Self::Overflow => write!(f, "Integer overflow in representation ring arithmetic"),
            Self::LengthMismatch { expected, found } => write!(
                f,
                "Vector of length {found} does not match the {expected} classes of the table"
            ),
            Self::IncompatibleTable { required, classes } => write!(
                f,
                "Data requires a table with {required} classes, but the table has {classes}"
            ),
            Self::TableNotFound(name) => write!(f, "Character table '{name}' not found on path"),
        }
    }
}

impl std::error::Error for RingError {}
