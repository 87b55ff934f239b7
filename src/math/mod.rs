//! Dense vector and matrix types.
//!
//! Provides `Vector` (1D) and `Matrix` (2D, row-major) over `f64`, the
//! traversal iterators used to implement their element-wise operations, the
//! flat-buffer helpers they share, and free functions for the 2- and
//! 3-element special cases.
pub mod buffer;
pub mod fixed;
pub mod matrix;
pub mod traversal;
pub mod vector;

pub use matrix::Matrix;
pub use traversal::{Line, MatrixCells, MatrixLine, VectorCells};
pub use vector::Vector;

use num_traits::Float;

/// Tolerance comparison: bitwise-equal values (so a `NaN` matches itself),
/// numerically equal values (`0.0 == -0.0`), or values closer than
/// `tolerance`.
#[inline]
pub(crate) fn approx_eq<T: Float>(a: T, b: T, tolerance: T) -> bool {
    a.integer_decode() == b.integer_decode() || a == b || (a - b).abs() < tolerance
}
