//! Crate-wide error type and the validation helpers shared by all operators.

use std::fmt;

// ─────────────────────────────────────────────────────────────
//  Error type
// ─────────────────────────────────────────────────────────────

/// Unified error type for all fallible operations in the crate.
///
/// Construction and rebinding validate shapes eagerly and report
/// [`OperatorError::Shape`]; the apply path checks input lengths and
/// reports [`OperatorError::Dimension`].  Numerical degeneration (NaN/∞
/// from a non-PSD eigen input) is not an error: it propagates through
/// applies, and callers inspect results for finiteness.
#[derive(Debug)]
pub enum OperatorError {
    /// Operand shapes are inconsistent at construction or rebind time
    /// (weight length, summand extents, product inner dimension,
    /// non-square eigen input).
    Shape {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    /// Input vector length does not match the operator extent at apply
    /// time (`cols` for `apply`, `rows` for `apply_adjoint`).
    Dimension {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    /// A block placement referenced a sub-operator index that was never
    /// registered.
    UnknownBlock { index: usize, registered: usize },
    /// LAPACK failure during the symmetric eigen-decomposition.
    Eigen(ndarray_linalg::error::LinalgError),
    /// A persist sink refused the dump.
    Io(std::io::Error),
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { context, expected, found } =>
                write!(f, "shape mismatch in {context}: expected {expected}, found {found}"),
            Self::Dimension { context, expected, found } =>
                write!(f, "dimension mismatch in {context}: expected length {expected}, found {found}"),
            Self::UnknownBlock { index, registered } =>
                write!(f, "unknown block index {index} ({registered} operators registered)"),
            Self::Eigen(e) => write!(f, "eigen-decomposition failed: {e}"),
            Self::Io(e) => write!(f, "persist failed: {e}"),
        }
    }
}

impl std::error::Error for OperatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Eigen(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ndarray_linalg::error::LinalgError> for OperatorError {
    fn from(e: ndarray_linalg::error::LinalgError) -> Self {
        Self::Eigen(e)
    }
}

impl From<std::io::Error> for OperatorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ─────────────────────────────────────────────────────────────
//  Validation helpers
// ─────────────────────────────────────────────────────────────

/// Construction/rebind-time length check.  `context` names the operand
/// being validated ("left weights", "product inner dimension", ...).
pub(crate) fn check_shape(
    context: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), OperatorError> {
    if found != expected {
        return Err(OperatorError::Shape { context, expected, found });
    }
    Ok(())
}

/// Apply-time input length check.  `context` names the operation
/// ("diagonal apply", "block adjoint apply", ...).
pub(crate) fn check_dimension(
    context: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), OperatorError> {
    if found != expected {
        return Err(OperatorError::Dimension { context, expected, found });
    }
    Ok(())
}
