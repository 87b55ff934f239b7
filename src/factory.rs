//! Constructors that build vectors and matrices from literal text, ranges,
//! constants or other vectors.
//!
//! The literal grammar follows MATLAB: `[1 2 3; 4 5 6]` is a 2x3 matrix,
//! `[1 2 3]` a vector. Brackets are optional, rows are separated by `;` and
//! elements by spaces. Extra whitespace around tokens is ignored, as are
//! blank rows, so `"[1 2;]"` is a 1x2 matrix and `"[]"` is empty.

use log::{debug, warn};

use crate::config::{COL_DELIMITER, ROW_DELIMITER};
use crate::error::{LinalgError, Result};
use crate::math::{Matrix, Vector};

fn strip_brackets(s: &str) -> String {
    s.chars().filter(|&c| c != '[' && c != ']').collect()
}

fn parse_token(token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|source| LinalgError::Parse {
        token: token.to_string(),
        source,
    })
}

fn parse_row(row: &str) -> Result<Vec<f64>> {
    row.split(COL_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_token)
        .collect()
}

/// Parse a vector literal such as `[1 2 3]`.
pub fn parse_vector(literal: &str) -> Result<Vector> {
    let body = strip_brackets(literal);
    Ok(Vector::from_vec(parse_row(&body)?))
}

/// Parse a matrix literal such as `[1 2 3; 4 5 6]`.
///
/// Every row must have as many elements as the first one.
pub fn parse_matrix(literal: &str) -> Result<Matrix> {
    let body = strip_brackets(literal);
    let rows = body
        .split(ROW_DELIMITER)
        .filter(|r| !r.trim().is_empty())
        .map(parse_row)
        .collect::<Result<Vec<_>>>()?;

    let matrix = Matrix::from_rows(&rows).map_err(|e| {
        warn!("Rejecting jagged matrix literal '{}': {}", literal, e);
        e
    })?;
    debug!(
        "Parsed {}x{} matrix from literal",
        matrix.rows(),
        matrix.cols()
    );
    Ok(matrix)
}

/// Largest element count a `Vec<f64>` can hold.
const MAX_RANGE_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// `ceil((end - start) / step)` elements, the `i`-th being `start + i * step`.
///
/// A step pointing away from `end` yields the empty vector.
pub fn range(start: f64, end: f64, step: f64) -> Result<Vector> {
    if step == 0.0 {
        return Err(LinalgError::InvalidInput("range step must be non-zero".into()));
    }
    let count = ((end - start) / step).ceil();
    if !count.is_finite() {
        return Err(LinalgError::InvalidInput(format!(
            "range [{}, {}) with step {} has no finite length",
            start, end, step
        )));
    }
    if count > MAX_RANGE_LEN as f64 {
        return Err(LinalgError::InvalidInput(format!(
            "range [{}, {}) with step {} has {} elements, more than {}",
            start, end, step, count, MAX_RANGE_LEN
        )));
    }
    let size = count.max(0.0) as usize;
    Ok((0..size).map(|i| start + i as f64 * step).collect())
}

/// `n x n` matrix with ones on the diagonal.
pub fn identity(n: usize) -> Matrix {
    let mut m = Matrix::zeros(n, n);
    m.update(|i, j, _| if i == j { 1.0 } else { 0.0 });
    m
}

fn check_stack(vectors: &[Vector]) -> Result<usize> {
    let first = vectors.first().ok_or_else(|| {
        LinalgError::InvalidInput("cannot build a matrix from zero vectors".into())
    })?;
    let len = first.len();
    if let Some(bad) = vectors.iter().find(|v| v.len() != len) {
        return Err(LinalgError::LengthMismatch {
            expected: len,
            found: bad.len(),
        });
    }
    Ok(len)
}

/// Stack `vectors` as the rows of a new matrix.
pub fn stack_rows(vectors: &[Vector]) -> Result<Matrix> {
    let len = check_stack(vectors)?;
    let mut data = Vec::with_capacity(vectors.len() * len);
    for v in vectors {
        data.extend_from_slice(v.as_slice());
    }
    Matrix::from_shape_vec((vectors.len(), len), data)
}

/// Stack `vectors` as the columns of a new matrix.
pub fn stack_cols(vectors: &[Vector]) -> Result<Matrix> {
    Ok(stack_rows(vectors)?.transpose())
}
