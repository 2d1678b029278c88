//! Heterogeneous block container: sub-operators placed at row/col offsets.
//!
//! The container owns its sub-operators.  Registration and placement are
//! separate steps so one registered operator can appear at several
//! offsets; `add` does both in one call.  Overlapping placements
//! accumulate their contributions.

use crate::operator::LinearOperator;
use crate::types::{check_dimension, OperatorError};
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1};

// ─────────────────────────────────────────────────────────────
//  Block container
// ─────────────────────────────────────────────────────────────

/// One placement of a registered sub-operator.
#[derive(Debug, Clone, Copy)]
struct BlockEntry {
    op: usize,
    row: usize,
    col: usize,
}

/// Composite operator assembled from sub-operators at row/col offsets.
///
/// Total extents are `max(offset + sub-extent)` over all placements,
/// recomputed whenever an entry is added.  Sub-operators are boxed and
/// owned, so transient values can be registered without the caller
/// keeping them alive.
#[derive(Debug, Default)]
pub struct BlockOperator {
    ops: Vec<Box<dyn LinearOperator>>,
    entries: Vec<BlockEntry>,
    rows: usize,
    cols: usize,
}

impl BlockOperator {
    /// Empty container with 0x0 extents.
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` independently owned copies of a dense block along the
    /// diagonal: copy `i` lands at `(i·nr, i·nc)`, giving a
    /// `(count·nr, count·nc)` operator.
    pub fn block_diagonal(block: &Array2<f64>, count: usize) -> Self {
        let (nr, nc) = block.dim();
        let mut out = Self::new();
        for i in 0..count {
            out.add(block.clone(), i * nr, i * nc);
        }
        out
    }

    /// Register a sub-operator, taking ownership, and return its index.
    /// The operator contributes nothing until placed with
    /// [`add_entry`](Self::add_entry).
    pub fn add_operator(&mut self, op: impl LinearOperator + 'static) -> usize {
        self.ops.push(Box::new(op));
        self.ops.len() - 1
    }

    /// Place a registered sub-operator at `(row, col)`.
    ///
    /// Fails if `index` was never returned by
    /// [`add_operator`](Self::add_operator).
    pub fn add_entry(&mut self, index: usize, row: usize, col: usize) -> Result<(), OperatorError> {
        if index >= self.ops.len() {
            return Err(OperatorError::UnknownBlock { index, registered: self.ops.len() });
        }
        self.place(index, row, col);
        Ok(())
    }

    /// Register and place in one call, returning the new index.
    pub fn add(&mut self, op: impl LinearOperator + 'static, row: usize, col: usize) -> usize {
        let index = self.add_operator(op);
        self.place(index, row, col);
        index
    }

    /// Number of registered sub-operators.
    pub fn num_operators(&self) -> usize {
        self.ops.len()
    }

    /// Number of placements.
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    fn place(&mut self, index: usize, row: usize, col: usize) {
        let op = &self.ops[index];
        self.rows = self.rows.max(row + op.rows());
        self.cols = self.cols.max(col + op.cols());
        self.entries.push(BlockEntry { op: index, row, col });
        debug!(
            "placed operator {index} at ({row},{col}); extents now {}x{}",
            self.rows, self.cols
        );
    }
}

impl LinearOperator for BlockOperator {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn apply(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("block apply", self.cols, x.len())?;
        let mut y = Array1::<f64>::zeros(self.rows);
        for e in &self.entries {
            let op = &self.ops[e.op];
            let xs = x.slice(s![e.col..e.col + op.cols()]);
            let ys = op.apply(xs)?;
            let mut seg = y.slice_mut(s![e.row..e.row + op.rows()]);
            seg += &ys;
        }
        Ok(y)
    }

    fn apply_adjoint(&self, y: ArrayView1<f64>) -> Result<Array1<f64>, OperatorError> {
        check_dimension("block adjoint apply", self.rows, y.len())?;
        let mut x = Array1::<f64>::zeros(self.cols);
        for e in &self.entries {
            let op = &self.ops[e.op];
            let ys = y.slice(s![e.row..e.row + op.rows()]);
            let xs = op.apply_adjoint(ys)?;
            let mut seg = x.slice_mut(s![e.col..e.col + op.cols()]);
            seg += &xs;
        }
        Ok(x)
    }
}
