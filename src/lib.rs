//! **Proteus** — matrix-free linear-operator composition for iterative inversion.
//!
//! Operators expose forward and adjoint application plus their extents, and
//! nothing else; gradient computation, normal-equation solves, and weighted
//! regularization are built by external drivers from those primitives alone:
//!
//! 1. **Contract** (`operator`): `LinearOperator` trait, dense / sparse / identity leaves.
//! 2. **Scaling** (`scaling`): left / right element-wise weighting, rebindable weights.
//! 3. **Combinators** (`combine`): Sum and Product of operators.
//! 4. **Diagonal** (`diagonal`): square diagonal operator.
//! 5. **Inverse root** (`invroot`): eigen-factored A^(-1/2), applied implicitly.
//! 6. **Blocks** (`block`): sub-operators at row/col offsets, block-diagonal helper.

pub mod types;
pub mod operator;
pub mod scaling;
pub mod combine;
pub mod diagonal;
pub mod invroot;
pub mod block;
