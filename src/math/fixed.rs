//! Products that only exist for 2- and 3-element vectors.

use crate::error::{LinalgError, Result};
use crate::math::Vector;

fn expect_len(v: &Vector, len: usize) -> Result<()> {
    if v.len() != len {
        return Err(LinalgError::LengthMismatch {
            expected: len,
            found: v.len(),
        });
    }
    Ok(())
}

/// Cross product `u x v` of two 3-element vectors.
pub fn cross(u: &Vector, v: &Vector) -> Result<Vector> {
    expect_len(u, 3)?;
    expect_len(v, 3)?;
    Ok(Vector::from_vec(vec![
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]))
}

/// Scalar triple product `u . (v x w)`.
pub fn triple_product(u: &Vector, v: &Vector, w: &Vector) -> Result<f64> {
    expect_len(u, 3)?;
    u.dot(&cross(v, w)?)
}

/// z component of the cross product of two 2-element vectors.
pub fn perp_dot(u: &Vector, v: &Vector) -> Result<f64> {
    expect_len(u, 2)?;
    expect_len(v, 2)?;
    Ok(u[0] * v[1] - u[1] * v[0])
}
