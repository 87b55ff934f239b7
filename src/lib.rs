//! redeem-linalg: small dense linear algebra for fixed-size problems.
//!
//! This crate provides a real-valued `Vector` and a row-major `Matrix` with
//! element-wise arithmetic, norms, products, transposition and inversion via
//! Laplace (cofactor) expansion. Equality between values is tolerance based
//! (`config::EPS`).
//!
//! The determinant is computed recursively and costs factorial time in the
//! matrix size; the types target small matrices (roughly 10x10 and below).
pub mod config;
pub mod error;
pub mod factory;
pub mod math;

pub use config::{LinalgConfig, SingularPolicy, EPS};
pub use error::{ErrorKind, LinalgError, Result};
pub use math::{Line, Matrix, Vector};
