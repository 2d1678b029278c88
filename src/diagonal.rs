//! Square diagonal operator defined by its diagonal vector.

use crate::operator::LinearOperator;
use crate::types::{check_dimension, OperatorError};
use ndarray::{Array1, ArrayView1};
use std::io::{self, Write};

/// diag(d): element-wise scaling of a length-`d.len()` vector.
/// Self-adjoint, so both applies are the same product.
#[derive(Debug, Clone)]
pub struct DiagonalOperator {
    d: Array1<f64>,
}

impl DiagonalOperator {
    pub fn new(d: Array1<f64>) -> Self {
        Self { d }
    }

    /// The stored diagonal.
    pub fn diagonal(&self) -> ArrayView1<f64> {
        self.d.view()
    }
}

impl LinearOperator for DiagonalOperator {
    fn rows(&self) -> usize {
        self.d.len()
    }

    fn cols(&self) -> usize {
        self.d.len()
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("diagonal apply", self.d.len(), x.len())?;
        Ok(&x * &self.d)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("diagonal adjoint apply", self.d.len(), y.len())?;
        Ok(&y * &self.d)
    }

    /// One diagonal entry per text line.
    fn persist(&self, sink: &mut dyn io::Write) -> Result<(), OperatorError> {
        for v in self.d.iter() {
            writeln!(sink, "{v}")?;
        }
        Ok(())
    }
}
