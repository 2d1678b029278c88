//! The operator contract, plus leaf implementations for the ecosystem's
//! dense and sparse matrix types and a scaled identity.

use crate::types::{check_dimension, OperatorError};
use ndarray::{Array1, Array2, ArrayView1};
use sprs::{CsMat, CsMatView};
use std::fmt::Debug;
use std::io::{self, Write};

// ─────────────────────────────────────────────────────────────
//  Operator contract
// ─────────────────────────────────────────────────────────────

/// Matrix-free linear operator.
///
/// Implement `rows`, `cols`, `apply`, and `apply_adjoint` to add a custom
/// operator; every wrapper and combinator in this crate works purely
/// through these four methods.  Both applies must be deterministic and
/// side-effect-free, so finished operator trees can be read from several
/// threads at once.
pub trait LinearOperator: Debug + Send + Sync {
    /// Output length of `apply` (input length of `apply_adjoint`).
    fn rows(&self) -> usize;

    /// Input length of `apply` (output length of `apply_adjoint`).
    fn cols(&self) -> usize;

    /// Forward application  y = A·x.
    ///
    /// Fails with a dimension error unless `x.len() == cols()`.
    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError>;

    /// Adjoint (transpose) application  x = Aᵀ·y.
    ///
    /// Fails with a dimension error unless `y.len() == rows()`.
    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError>;

    /// Dump a diagnostic representation to `sink`.
    ///
    /// Leaves with a concrete matrix form write a plain-text dump;
    /// everything else keeps this no-op default.
    fn persist(&self, _sink: &mut dyn io::Write) -> Result<(), OperatorError> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Forwarding impls  (lend a leaf, or move it in a box)
// ─────────────────────────────────────────────────────────────

impl<T: LinearOperator + ?Sized> LinearOperator for &T {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        (**self).apply(x)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        (**self).apply_adjoint(y)
    }

    fn persist(&self, sink: &mut dyn io::Write) -> Result<(), OperatorError> {
        (**self).persist(sink)
    }
}

impl<T: LinearOperator + ?Sized> LinearOperator for Box<T> {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        (**self).apply(x)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        (**self).apply_adjoint(y)
    }

    fn persist(&self, sink: &mut dyn io::Write) -> Result<(), OperatorError> {
        (**self).persist(sink)
    }
}

// ─────────────────────────────────────────────────────────────
//  Dense leaf  (ndarray)
// ─────────────────────────────────────────────────────────────

impl LinearOperator for Array2<f64> {
    fn rows(&self) -> usize {
        self.nrows()
    }

    fn cols(&self) -> usize {
        self.ncols()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("dense apply", self.ncols(), x.len())?;
        Ok(self.dot(&x))
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("dense adjoint apply", self.nrows(), y.len())?;
        Ok(self.t().dot(&y))
    }

    /// One text line per row, entries separated by single spaces.
    fn persist(&self, sink: &mut dyn io::Write) -> Result<(), OperatorError> {
        for row in self.outer_iter() {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(sink, " ")?;
                }
                write!(sink, "{v}")?;
            }
            writeln!(sink)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Sparse leaf  (sprs, either storage order)
// ─────────────────────────────────────────────────────────────

impl LinearOperator for CsMat<f64> {
    fn rows(&self) -> usize {
        self.shape().0
    }

    fn cols(&self) -> usize {
        self.shape().1
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("sparse apply", self.shape().1, x.len())?;
        Ok(sparse_matvec(self.view(), x))
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("sparse adjoint apply", self.shape().0, y.len())?;
        // transpose_view flips the storage order in place, no copy
        Ok(sparse_matvec(self.transpose_view(), y))
    }
}

// ─────────────────────────────────────────────────────────────
//  Scaled identity leaf
// ─────────────────────────────────────────────────────────────

/// Identity of a given dimension, uniformly scaled by `value`.
///
/// Appending a weighted identity to a regularization stack adds damping
/// without assembling any matrix.
#[derive(Debug, Clone)]
pub struct IdentityOperator {
    dim: usize,
    value: f64,
}

impl IdentityOperator {
    /// Plain identity (value 1).
    pub fn new(dim: usize) -> Self {
        Self { dim, value: 1.0 }
    }

    /// Identity scaled by a uniform factor.
    pub fn scaled(dim: usize, value: f64) -> Self {
        Self { dim, value }
    }
}

impl LinearOperator for IdentityOperator {
    fn rows(&self) -> usize {
        self.dim
    }

    fn cols(&self) -> usize {
        self.dim
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("identity apply", self.dim, x.len())?;
        Ok(&x * self.value)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("identity adjoint apply", self.dim, y.len())?;
        Ok(&y * self.value)
    }
}

// ─────────────────────────────────────────────────────────────
//  Sparse matvec helper
// ─────────────────────────────────────────────────────────────

/// y = A·x  by iterating the outer storage dimension.
///
/// CSC scatters column contributions into y; CSR gathers along each row.
/// Callers pass `transpose_view()` for the adjoint product.
fn sparse_matvec(a: CsMatView<f64>, x: ArrayView1<f64>) -> Array1<f64> {
    let (nrows, ncols) = a.shape();
    let mut y = Array1::<f64>::zeros(nrows);
    if a.is_csc() {
        for col in 0..ncols {
            let xc = x[col];
            let start = a.indptr().raw_storage()[col];
            let end_ = a.indptr().raw_storage()[col + 1];
            for nz in start..end_ {
                y[a.indices()[nz]] += a.data()[nz] * xc;
            }
        }
    } else {
        for row in 0..nrows {
            let mut acc = 0.0;
            let start = a.indptr().raw_storage()[row];
            let end_ = a.indptr().raw_storage()[row + 1];
            for nz in start..end_ {
                acc += a.data()[nz] * x[a.indices()[nz]];
            }
            y[row] = acc;
        }
    }
    y
}
