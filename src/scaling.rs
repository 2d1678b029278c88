//! Element-wise scaling wrappers: weight a base operator from the left,
//! the right, or both sides without forming any matrix.

use crate::operator::LinearOperator;
use crate::types::{check_dimension, check_shape, OperatorError};
use ndarray::{Array1, ArrayView1};

// ─────────────────────────────────────────────────────────────
//  Scaled operator
// ─────────────────────────────────────────────────────────────

/// A base operator with optional left and/or right weight vectors:
///
///   apply(x)          =  l ⊙ A·(r ⊙ x)
///   apply_adjoint(y)  =  r ⊙ Aᵀ·(l ⊙ y)
///
/// with either weight treated as all-ones when absent.  Weight lengths
/// are validated against the base extents at construction and again on
/// every rebind, never lazily at the next apply.
#[derive(Debug)]
pub struct ScaledOperator<A> {
    base: A,
    left: Option<Array1<f64>>,
    right: Option<Array1<f64>>,
}

impl<A: LinearOperator> ScaledOperator<A> {
    /// Row weighting  l ⊙ A·x.  Requires `weights.len() == base.rows()`.
    pub fn left(base: A, weights: Array1<f64>) -> Result<Self, OperatorError> {
        check_shape("left weights", base.rows(), weights.len())?;
        Ok(Self { base, left: Some(weights), right: None })
    }

    /// Column weighting  A·(r ⊙ x).  Requires `weights.len() == base.cols()`.
    pub fn right(base: A, weights: Array1<f64>) -> Result<Self, OperatorError> {
        check_shape("right weights", base.cols(), weights.len())?;
        Ok(Self { base, left: None, right: Some(weights) })
    }

    /// Weighting on both sides  l ⊙ A·(r ⊙ x).
    pub fn both(base: A, left: Array1<f64>, right: Array1<f64>) -> Result<Self, OperatorError> {
        check_shape("left weights", base.rows(), left.len())?;
        check_shape("right weights", base.cols(), right.len())?;
        Ok(Self { base, left: Some(left), right: Some(right) })
    }

    /// Rebind the left weight vector.  Length is checked here, so a
    /// rejected rebind leaves the previous weights in place.
    pub fn set_left(&mut self, weights: Array1<f64>) -> Result<(), OperatorError> {
        check_shape("left weights", self.base.rows(), weights.len())?;
        self.left = Some(weights);
        Ok(())
    }

    /// Rebind the right weight vector.
    pub fn set_right(&mut self, weights: Array1<f64>) -> Result<(), OperatorError> {
        check_shape("right weights", self.base.cols(), weights.len())?;
        self.right = Some(weights);
        Ok(())
    }

    /// Current left weights, if any.
    pub fn left_weights(&self) -> Option<ArrayView1<f64>> {
        self.left.as_ref().map(|w| w.view())
    }

    /// Current right weights, if any.
    pub fn right_weights(&self) -> Option<ArrayView1<f64>> {
        self.right.as_ref().map(|w| w.view())
    }

    /// The wrapped base operator.
    pub fn base(&self) -> &A {
        &self.base
    }
}

impl<A: LinearOperator> LinearOperator for ScaledOperator<A> {
    fn rows(&self) -> usize {
        self.base.rows()
    }

    fn cols(&self) -> usize {
        self.base.cols()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("scaled apply", self.base.cols(), x.len())?;
        let mut y = match &self.right {
            Some(r) => self.base.apply((&x * r).view())?,
            None => self.base.apply(x)?,
        };
        if let Some(l) = &self.left {
            y *= l;
        }
        Ok(y)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("scaled adjoint apply", self.base.rows(), y.len())?;
        let mut x = match &self.left {
            Some(l) => self.base.apply_adjoint((&y * l).view())?,
            None => self.base.apply_adjoint(y)?,
        };
        if let Some(r) = &self.right {
            x *= r;
        }
        Ok(x)
    }
}
