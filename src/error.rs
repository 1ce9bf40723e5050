/// Every way a set of coefficients or a precision can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasError {
    Empty,
    Negative { index: usize, value: f64 },
    NonFinite { index: usize, value: f64 },
    ZeroSum,
    InvalidEpsilon(f64),
    /// `len * 2^mu` does not fit in the exact integer range of an `f64`.
    PrecisionOverflow { mu: u32, len: usize },
    LengthMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for AliasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasError::Empty => write!(f, "coefficient slice is empty"),
            AliasError::Negative { index, value } => {
                write!(
                    f,
                    "coefficients contain a negative value at index {index}: {value}"
                )
            }
            AliasError::NonFinite { index, value } => {
                write!(
                    f,
                    "coefficients contain a non-finite value at index {index}: {value}"
                )
            }
            AliasError::ZeroSum => write!(f, "sum of coefficients is zero or not finite"),
            AliasError::InvalidEpsilon(eps) => {
                write!(f, "epsilon must be finite and positive, got {eps}")
            }
            AliasError::PrecisionOverflow { mu, len } => {
                write!(f, "{len} entries at {mu} bits of precision exceed 2^53 bins")
            }
            AliasError::LengthMismatch { expected, found } => {
                write!(f, "expected {expected} coefficients, found {found}")
            }
        }
    }
}

impl std::error::Error for AliasError {}
