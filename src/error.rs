use thiserror::Error;

/// Errors reported by the fallible parts of the library.
///
/// The trajectory integrator itself never fails; these cover parsing,
/// parameter validation, checked table access and the iterative solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BallisticsError {
    #[error("unknown drag model: {0}")]
    UnknownDragModel(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("yard {index} is outside the solution ({len} valid yards)")]
    OutOfRange { index: usize, len: usize },

    #[error("no solution: {0}")]
    NoSolution(String),
}

impl BallisticsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        BallisticsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), BallisticsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BallisticsError::invalid(name, format!("must be finite and > 0, got {value}")))
    }
}

/// Reject values that are NaN or infinite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), BallisticsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BallisticsError::invalid(name, format!("must be finite, got {value}")))
    }
}
