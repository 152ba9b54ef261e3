use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The lookup tables are not built yet, or cannot evaluate this input.
    BackendUnavailable { reason: String },
    /// Concealed tile count does not fit the number of melds.
    InvalidHandSize { expected: usize, actual: usize },
    /// Hand, winning tile and melds contradict each other.
    InconsistentHand { message: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::BackendUnavailable { reason } => {
                write!(f, "Backend unavailable: {}", reason)
            }
            EvalError::InvalidHandSize { expected, actual } => {
                write!(f, "Invalid hand size: expected {} tiles, got {}", expected, actual)
            }
            EvalError::InconsistentHand { message } => {
                write!(f, "Inconsistent hand: {}", message)
            }
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(feature = "python")]
impl From<EvalError> for pyo3::PyErr {
    fn from(err: EvalError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
