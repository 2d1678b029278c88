//! Implicit inverse square root  A^(-1/2)  of a dense symmetric matrix.
//!
//! A one-time eigen-decomposition  A = V·diag(λ)·Vᵀ  is stored, and each
//! apply computes  V·(diag(1/√λ)·(Vᵀ·x))  without ever forming the dense
//! inverse root.

use crate::operator::LinearOperator;
use crate::types::{check_dimension, check_shape, OperatorError};
use log::info;
use ndarray::{Array1, Array2, ArrayView1};
use ndarray_linalg::{Eigh, UPLO};
use std::time::Instant;

/// Inverse square root of a symmetric PSD matrix, held in factored form.
///
/// Construction reads the lower triangle and costs one dense
/// eigen-decomposition; applies are two matrix-vector products.  The
/// operator is immutable: when the underlying matrix changes, build a
/// new instance.
///
/// PSD-ness is an unchecked precondition.  Zero or negative eigenvalues
/// yield ∞/NaN scale factors that propagate silently through every
/// apply; callers who care inspect [`eigenvalues`](Self::eigenvalues) or
/// the output for finiteness.
#[derive(Debug)]
pub struct InverseSqrtOperator {
    /// Eigenvector basis V, one eigenvector per column.
    vectors: Array2<f64>,
    /// Eigenvalues λ in ascending order.
    values: Array1<f64>,
    /// 1/√λ per eigenvalue.
    scale: Array1<f64>,
}

impl InverseSqrtOperator {
    /// Decompose a dense symmetric matrix.
    ///
    /// Fails with a shape error if the matrix is not square, and with an
    /// eigen error if LAPACK does not converge.
    pub fn new(matrix: &Array2<f64>) -> Result<Self, OperatorError> {
        check_shape("inverse-sqrt input", matrix.nrows(), matrix.ncols())?;
        let t0 = Instant::now();
        let (values, vectors) = matrix.eigh(UPLO::Lower)?;
        info!(
            "inverse root of {}x{} matrix: eigh took {:.3}s",
            matrix.nrows(),
            matrix.ncols(),
            t0.elapsed().as_secs_f64()
        );
        let scale = values.mapv(|ew| 1.0 / ew.sqrt());
        Ok(Self { vectors, values, scale })
    }

    /// Eigenvalues of the decomposed matrix, ascending.  A non-positive
    /// entry means the input was not PSD and applies degenerate.
    pub fn eigenvalues(&self) -> ArrayView1<f64> {
        self.values.view()
    }
}

impl LinearOperator for InverseSqrtOperator {
    fn rows(&self) -> usize {
        self.values.len()
    }

    fn cols(&self) -> usize {
        self.values.len()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("inverse-sqrt apply", self.values.len(), x.len())?;
        let mut c = self.vectors.t().dot(&x);
        c *= &self.scale;
        Ok(self.vectors.dot(&c))
    }

    /// Symmetric in the eigenbasis, so the adjoint is the same product.
    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("inverse-sqrt adjoint apply", self.values.len(), y.len())?;
        let mut c = self.vectors.t().dot(&y);
        c *= &self.scale;
        Ok(self.vectors.dot(&c))
    }
}
