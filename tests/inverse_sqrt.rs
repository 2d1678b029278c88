//! Tests for the eigen-factored inverse square root operator.
//!
//! The defining property:  applying the operator twice to A·x recovers x,
//! so a single apply is a genuine A^(-1/2).  Non-PSD input is an
//! unchecked precondition and must degenerate to non-finite output
//! rather than an error.

use ndarray::{Array1, Array2};
use proteus::combine::ProductOperator;
use proteus::invroot::InverseSqrtOperator;
use proteus::operator::LinearOperator;
use proteus::types::OperatorError;

// ─────────────────────────────────────────────────────────────
//  Helpers  (pseudo_random_vec / check_adjoint duplicated from
//  composites.rs)
// ─────────────────────────────────────────────────────────────

fn pseudo_random_vec(state: &mut u64, n: usize) -> Array1<f64> {
    let mut v = Vec::with_capacity(n);
    for _ in 0..n {
        *state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let u = (*state >> 11) as f64 / (1u64 << 53) as f64;
        v.push(2.0 * u - 1.0);
    }
    Array1::from(v)
}

fn pseudo_random_mat(state: &mut u64, rows: usize, cols: usize) -> Array2<f64> {
    let flat = pseudo_random_vec(state, rows * cols).to_vec();
    Array2::from_shape_vec((rows, cols), flat).unwrap()
}

/// SPD test matrix  BᵀB + I  with eigenvalues ≥ 1.
fn spd_matrix(state: &mut u64, n: usize) -> Array2<f64> {
    let b = pseudo_random_mat(state, n, n);
    let mut a = b.t().dot(&b);
    for i in 0..n {
        a[[i, i]] += 1.0;
    }
    a
}

fn check_adjoint<O: LinearOperator>(op: &O, state: &mut u64, label: &str) {
    let x = pseudo_random_vec(state, op.cols());
    let y = pseudo_random_vec(state, op.rows());
    let lhs = op.apply(x.view()).unwrap().dot(&y);
    let rhs = x.dot(&op.apply_adjoint(y.view()).unwrap());
    let denom = lhs.abs().max(rhs.abs()).max(1.0);
    eprintln!("{label}: <Ox,y>={lhs:+.6e}  <x,Oty>={rhs:+.6e}  rel={:.2e}",
        (lhs - rhs).abs() / denom);
    assert!(
        ((lhs - rhs) / denom).abs() < 1e-12,
        "{label}: adjoint identity violated: {lhs:.10e} vs {rhs:.10e}",
    );
}

// ─────────────────────────────────────────────────────────────
//  Inverse relationship
// ─────────────────────────────────────────────────────────────

#[test]
fn applying_twice_inverts_the_matrix() {
    let mut state = 0x9e3779b97f4a7c15;
    let a = spd_matrix(&mut state, 6);
    let c = InverseSqrtOperator::new(&a).unwrap();
    assert_eq!(c.rows(), 6);
    assert_eq!(c.cols(), 6);

    let x = pseudo_random_vec(&mut state, 6);
    let ax = a.apply(x.view()).unwrap();
    let once = c.apply(ax.view()).unwrap();
    let twice = c.apply(once.view()).unwrap();

    let mut max_err = 0.0_f64;
    for i in 0..6 {
        max_err = max_err.max((twice[i] - x[i]).abs());
    }
    eprintln!("A^(-1/2) applied twice to A·x: max error = {max_err:.3e}");
    assert!(max_err < 1e-10, "max error {max_err:.3e} exceeds 1e-10");
}

#[test]
fn eigenvalues_are_ascending_and_shifted_positive() {
    let mut state = 0x9e3779b97f4a7c15;
    let a = spd_matrix(&mut state, 8);
    let c = InverseSqrtOperator::new(&a).unwrap();

    let ew = c.eigenvalues();
    for i in 1..ew.len() {
        assert!(ew[i] >= ew[i - 1], "eigenvalues not ascending at {i}");
    }
    // BᵀB + I keeps every eigenvalue at or above 1
    assert!(ew[0] > 0.9, "smallest eigenvalue {} below the +I shift", ew[0]);
}

// ─────────────────────────────────────────────────────────────
//  Self-adjointness and composition
// ─────────────────────────────────────────────────────────────

#[test]
fn operator_is_self_adjoint() {
    let mut state = 0x9e3779b97f4a7c15;
    let a = spd_matrix(&mut state, 5);
    let c = InverseSqrtOperator::new(&a).unwrap();
    check_adjoint(&c, &mut state, "inverse-sqrt");
}

/// C^(-1/2)·G, the whitened sensitivity stack a regularized driver builds.
#[test]
fn whitened_product_keeps_adjoint_identity() {
    let mut state = 0x9e3779b97f4a7c15;
    let a = spd_matrix(&mut state, 4);
    let c = InverseSqrtOperator::new(&a).unwrap();
    let g = pseudo_random_mat(&mut state, 4, 7);

    let op = ProductOperator::new(c, g).unwrap();
    assert_eq!(op.rows(), 4);
    assert_eq!(op.cols(), 7);
    check_adjoint(&op, &mut state, "whitened product");
}

// ─────────────────────────────────────────────────────────────
//  Degeneration and rejection
// ─────────────────────────────────────────────────────────────

#[test]
fn non_psd_input_degenerates_to_non_finite_output() {
    // symmetric indefinite: eigenvalues -1 and 1
    let a = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.0, -1.0]).unwrap();
    let c = InverseSqrtOperator::new(&a).unwrap();
    assert!(c.eigenvalues().iter().any(|&ew| ew < 0.0));

    let y = c.apply(Array1::from(vec![1.0, 1.0]).view()).unwrap();
    eprintln!("indefinite input, output: {y}");
    assert!(y.iter().any(|v| !v.is_finite()), "expected NaN/inf in {y}");

    // singular: a zero eigenvalue turns into an infinite scale factor
    let a = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.0, 0.0]).unwrap();
    let c = InverseSqrtOperator::new(&a).unwrap();
    let y = c.apply(Array1::from(vec![1.0, 1.0]).view()).unwrap();
    assert!(y.iter().any(|v| !v.is_finite()), "expected inf in {y}");
}

#[test]
fn rejects_non_square_input() {
    let a = Array2::<f64>::zeros((2, 3));
    match InverseSqrtOperator::new(&a) {
        Err(OperatorError::Shape { expected: 2, found: 3, .. }) => {}
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn rejects_wrong_apply_length() {
    let mut state = 0x9e3779b97f4a7c15;
    let a = spd_matrix(&mut state, 3);
    let c = InverseSqrtOperator::new(&a).unwrap();
    assert!(matches!(
        c.apply(Array1::from(vec![1.0, 2.0]).view()),
        Err(OperatorError::Dimension { expected: 3, found: 2, .. })
    ));
}
