//! Composite combinators: the sum and the product of two operators.

use crate::operator::LinearOperator;
use crate::types::{check_dimension, check_shape, OperatorError};
use ndarray::{Array1, ArrayView1};

// ─────────────────────────────────────────────────────────────
//  Sum  (A + B)
// ─────────────────────────────────────────────────────────────

/// Sum of two operators of identical shape:  (A + B)·x = A·x + B·x.
#[derive(Debug)]
pub struct SumOperator<A, B> {
    a: A,
    b: B,
}

impl<A: LinearOperator, B: LinearOperator> SumOperator<A, B> {
    /// Both summands must agree in rows and cols.
    pub fn new(a: A, b: B) -> Result<Self, OperatorError> {
        check_shape("summand rows", a.rows(), b.rows())?;
        check_shape("summand cols", a.cols(), b.cols())?;
        Ok(Self { a, b })
    }
}

impl<A: LinearOperator, B: LinearOperator> LinearOperator for SumOperator<A, B> {
    fn rows(&self) -> usize {
        self.a.rows()
    }

    fn cols(&self) -> usize {
        self.a.cols()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("sum apply", self.a.cols(), x.len())?;
        Ok(self.a.apply(x)? + self.b.apply(x)?)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("sum adjoint apply", self.a.rows(), y.len())?;
        Ok(self.a.apply_adjoint(y)? + self.b.apply_adjoint(y)?)
    }
}

// ─────────────────────────────────────────────────────────────
//  Product  (A ∘ B)
// ─────────────────────────────────────────────────────────────

/// Product of two operators:  (A·B)·x = A·(B·x), shape (A.rows, B.cols).
#[derive(Debug)]
pub struct ProductOperator<A, B> {
    a: A,
    b: B,
}

impl<A: LinearOperator, B: LinearOperator> ProductOperator<A, B> {
    /// The inner dimension must match: `a.cols() == b.rows()`.
    pub fn new(a: A, b: B) -> Result<Self, OperatorError> {
        check_shape("product inner dimension", a.cols(), b.rows())?;
        Ok(Self { a, b })
    }
}

impl<A: LinearOperator, B: LinearOperator> LinearOperator for ProductOperator<A, B> {
    fn rows(&self) -> usize {
        self.a.rows()
    }

    fn cols(&self) -> usize {
        self.b.cols()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("product apply", self.b.cols(), x.len())?;
        let inner = self.b.apply(x)?;
        self.a.apply(inner.view())
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("product adjoint apply", self.a.rows(), y.len())?;
        let inner = self.a.apply_adjoint(y)?;
        self.b.apply_adjoint(inner.view())
    }
}
