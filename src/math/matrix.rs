use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use std::str::FromStr;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::{LinalgConfig, SingularPolicy, DEFAULT_PRECISION, EPS};
use crate::error::{LinalgError, Result};
use crate::factory;
use crate::math::traversal::{Line, MatrixCells, MatrixLine};
use crate::math::vector::{dot_slices, Vector};
use crate::math::{approx_eq, buffer};

/// Dense `rows x cols` grid of real numbers stored row-major.
///
/// Element `(i, j)` lives at `data[i * cols + j]`, so every row holds
/// exactly `cols` elements.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Serialized form; validated on the way back in.
#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = LinalgError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        Matrix::from_shape_vec((repr.rows, repr.cols), repr.data)
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        MatrixRepr {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}

fn element_count(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}

impl Matrix {
    /// Take ownership of a row-major buffer of exactly `rows * cols` elements.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        let expected = element_count(rows, cols).ok_or(LinalgError::InvalidShape {
            rows,
            cols,
            reason: "element count overflows usize",
        })?;
        if data.len() != expected {
            return Err(LinalgError::LengthMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Self::from_shape_vec((rows, cols), data)
    }

    /// Copy a nested row list. The first row fixes `cols`; a row of any
    /// other length is rejected.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinalgError::LengthMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        if cols == 0 {
            return Ok(Self::zeros(0, 0));
        }
        Self::from_shape_vec((rows.len(), cols), data)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        let len = element_count(rows, cols)
            .unwrap_or_else(|| panic!("matrix shape {}x{} overflows usize", rows, cols));
        Self {
            data: vec![value; len],
            rows,
            cols,
        }
    }

    pub fn identity(n: usize) -> Self {
        factory::identity(n)
    }

    /// Stack vectors as rows.
    pub fn from_vectors_horizontal(vectors: &[Vector]) -> Result<Self> {
        factory::stack_rows(vectors)
    }

    /// Stack vectors as columns.
    pub fn from_vectors_vertical(vectors: &[Vector]) -> Result<Self> {
        factory::stack_cols(vectors)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(LinalgError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn check_line(&self, line: Line) -> Result<()> {
        match line {
            Line::Row(i) if i >= self.rows => Err(LinalgError::IndexOutOfBounds {
                index: i,
                len: self.rows,
            }),
            Line::Col(j) if j >= self.cols => Err(LinalgError::IndexOutOfBounds {
                index: j,
                len: self.cols,
            }),
            _ => Ok(()),
        }
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(LinalgError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    fn check_square(&self, reason: &'static str) -> Result<()> {
        if !self.is_square() || self.is_empty() {
            return Err(LinalgError::InvalidShape {
                rows: self.rows,
                cols: self.cols,
                reason,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_cell(row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_cell(row, col)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    /// `(row, col, value)` triples in row-major order.
    pub fn cells(&self) -> MatrixCells<'_> {
        MatrixCells::new(&self.data, self.cols)
    }

    /// `(index, value)` pairs along one row or column.
    pub fn line(&self, line: Line) -> Result<MatrixLine<'_>> {
        self.check_line(line)?;
        Ok(MatrixLine::new(&self.data, self.rows, self.cols, line))
    }

    /// Replace every cell with `f(row, col, old)` in row-major order.
    pub fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, usize, f64) -> f64,
    {
        for idx in 0..self.data.len() {
            let (i, j) = (idx / self.cols, idx % self.cols);
            self.data[idx] = f(i, j, self.data[idx]);
        }
    }

    /// Replace every element of one row or column with `f(index, old)`.
    pub fn update_line<F>(&mut self, line: Line, mut f: F) -> Result<()>
    where
        F: FnMut(usize, f64) -> f64,
    {
        self.check_line(line)?;
        for k in 0..line.len(self.rows, self.cols) {
            let offset = line.offset(k, self.cols);
            self.data[offset] = f(k, self.data[offset]);
        }
        Ok(())
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vector> {
        Ok(self.line(Line::Row(i))?.map(|(_, x)| x).collect())
    }

    /// Copy of column `j`.
    pub fn col(&self, j: usize) -> Result<Vector> {
        Ok(self.line(Line::Col(j))?.map(|(_, x)| x).collect())
    }

    pub fn set_row(&mut self, i: usize, row: &Vector) -> Result<()> {
        if row.len() != self.cols {
            return Err(LinalgError::LengthMismatch {
                expected: self.cols,
                found: row.len(),
            });
        }
        self.update_line(Line::Row(i), |k, _| row[k])
    }

    pub fn set_col(&mut self, j: usize, col: &Vector) -> Result<()> {
        if col.len() != self.rows {
            return Err(LinalgError::LengthMismatch {
                expected: self.rows,
                found: col.len(),
            });
        }
        self.update_line(Line::Col(j), |k, _| col[k])
    }

    /// Set every element of row `i` to `value`.
    pub fn fill_row(&mut self, i: usize, value: f64) -> Result<()> {
        self.update_line(Line::Row(i), |_, _| value)
    }

    /// Set every element of column `j` to `value`.
    pub fn fill_col(&mut self, j: usize, value: f64) -> Result<()> {
        self.update_line(Line::Col(j), |_, _| value)
    }

    pub fn map<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        let mut res = self.clone();
        res.update(|_, _, x| f(x));
        res
    }

    fn zip_with<F>(&self, other: &Matrix, mut f: F) -> Result<Matrix>
    where
        F: FnMut(f64, f64) -> f64,
    {
        self.check_same_shape(other)?;
        let mut res = self.clone();
        res.update(|i, j, x| f(x, other[(i, j)]));
        Ok(res)
    }

    pub fn add_scalar(&self, a: f64) -> Matrix {
        self.map(|x| x + a)
    }

    pub fn sub_scalar(&self, a: f64) -> Matrix {
        self.map(|x| x - a)
    }

    pub fn scale(&self, a: f64) -> Matrix {
        self.map(|x| x * a)
    }

    pub fn div_scalar(&self, a: f64) -> Result<Matrix> {
        if a == 0.0 {
            return Err(LinalgError::DivideByZero);
        }
        Ok(self.map(|x| x / a))
    }

    pub fn negate(&self) -> Matrix {
        self.map(|x| -x)
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Matrix product; `self.cols` must equal `other.rows`.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(LinalgError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut res = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.data[self.offset(i, k)];
                for j in 0..other.cols {
                    let offset = res.offset(i, j);
                    res.data[offset] += a_ik * other.data[other.offset(k, j)];
                }
            }
        }
        Ok(res)
    }

    /// Linear transform of `v`. Only square matrices are supported.
    pub fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        if !self.is_square() {
            return Err(LinalgError::UnsupportedShape {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if v.len() != self.cols {
            return Err(LinalgError::LengthMismatch {
                expected: self.cols,
                found: v.len(),
            });
        }
        Ok(self.rows_dot(v))
    }

    /// Dot product of every row with `v`; lengths are checked by callers.
    pub(crate) fn rows_dot(&self, v: &Vector) -> Vector {
        (0..self.rows)
            .map(|i| {
                let start = self.offset(i, 0);
                dot_slices(&self.data[start..start + self.cols], v.as_slice())
            })
            .collect()
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for (i, j, x) in self.cells() {
            let offset = res.offset(j, i);
            res.data[offset] = x;
        }
        res
    }

    /// Copy without row `i`; the remaining rows keep their order.
    pub fn remove_row(&self, i: usize) -> Result<Matrix> {
        self.check_line(Line::Row(i))?;
        let start = self.offset(i, 0);
        Ok(Matrix {
            data: buffer::remove_range(&self.data, start, start + self.cols),
            rows: self.rows - 1,
            cols: self.cols,
        })
    }

    /// Copy without column `j`; the remaining columns keep their order.
    pub fn remove_col(&self, j: usize) -> Result<Matrix> {
        self.check_line(Line::Col(j))?;
        let mut data = Vec::with_capacity(self.rows * (self.cols - 1));
        for row in self.data.chunks(self.cols) {
            data.extend(buffer::remove(row, j));
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols - 1,
        })
    }

    /// `remove_row(i)` followed by `remove_col(j)`.
    pub fn sub_matrix(&self, i: usize, j: usize) -> Result<Matrix> {
        self.remove_row(i)?.remove_col(j)
    }

    /// Minor without bounds checks, for the recursive expansions.
    fn minor(&self, i: usize, j: usize) -> Matrix {
        let n = self.rows - 1;
        let m = self.cols - 1;
        let mut data = Vec::with_capacity(n * m);
        for (r, row) in self.data.chunks(self.cols).enumerate() {
            if r == i {
                continue;
            }
            data.extend_from_slice(&row[..j]);
            data.extend_from_slice(&row[j + 1..]);
        }
        Matrix {
            data,
            rows: n,
            cols: m,
        }
    }

    /// Determinant by Laplace expansion along the first row.
    ///
    /// Cost is factorial in the dimension; intended for small matrices.
    pub fn det(&self) -> Result<f64> {
        self.check_square("determinant requires a non-empty square matrix")?;
        Ok(self.laplace_det())
    }

    fn laplace_det(&self) -> f64 {
        let n = self.rows;
        trace!("Laplace expansion of {}x{} matrix", n, n);
        match n {
            0 => 1.0,
            1 => self.data[0],
            2 => self.data[0] * self.data[3] - self.data[1] * self.data[2],
            _ => (0..n)
                .map(|j| sign(j) * self.data[j] * self.minor(0, j).laplace_det())
                .sum(),
        }
    }

    /// Matrix of signed minors: `(i, j) -> (-1)^(i+j) * det(sub_matrix(i, j))`.
    pub fn cofactor(&self) -> Result<Matrix> {
        self.check_square("cofactor requires a non-empty square matrix")?;
        debug!("Computing cofactor matrix of {}x{} matrix", self.rows, self.cols);
        let mut res = Matrix::zeros(self.rows, self.cols);
        res.update(|i, j, _| sign(i + j) * self.minor(i, j).laplace_det());
        Ok(res)
    }

    /// Inverse via the adjugate: `cofactor().transpose() / det()`.
    ///
    /// Fails with `LinalgError::Singular` when the determinant is zero.
    pub fn inverse(&self) -> Result<Matrix> {
        self.inverse_with(&LinalgConfig::default())
    }

    /// Inverse honouring `config.singular` for zero determinants.
    pub fn inverse_with(&self, config: &LinalgConfig) -> Result<Matrix> {
        let det = self.det()?;
        debug!("Inverting {}x{} matrix with determinant {}", self.rows, self.cols, det);
        if det == 0.0 {
            match config.singular {
                SingularPolicy::Fail => return Err(LinalgError::Singular),
                SingularPolicy::Propagate => {
                    warn!("Inverting a singular matrix; result will contain inf/NaN entries")
                }
            }
        }
        Ok(self.cofactor()?.transpose().scale(1.0 / det))
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> Result<f64> {
        self.check_square("trace requires a non-empty square matrix")?;
        Ok((0..self.rows).map(|i| self.data[self.offset(i, i)]).sum())
    }

    /// Same shape and every pair of cells within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        (0..self.rows).all(|i| {
            let start = self.offset(i, 0);
            let end = start + self.cols;
            self.data[start..end]
                .iter()
                .zip(other.data[start..end].iter())
                .all(|(&a, &b)| approx_eq(a, b, tolerance))
        })
    }

    /// Pretty-print with `precision` decimals, columns right-aligned so
    /// signs line up.
    pub fn render(&self, precision: usize) -> String {
        if self.is_empty() {
            return "[]".to_string();
        }
        let cells: Vec<String> = self
            .data
            .iter()
            .map(|x| format!("{:.p$}", x, p = precision))
            .collect();
        let width = cells.iter().map(|s| s.len()).max().unwrap_or(0);
        let mut out = String::from("[");
        for (i, row) in cells.chunks(self.cols).enumerate() {
            if i > 0 {
                out.push_str("\n ");
            }
            out.push('[');
            let padded: Vec<String> = row.iter().map(|s| format!("{:>w$}", s, w = width)).collect();
            out.push_str(&padded.join(" "));
            out.push(']');
        }
        out.push(']');
        out
    }

    /// Literal form accepted by `FromStr`, e.g. `[1 2; 3 4]`.
    pub fn to_literal(&self) -> String {
        let rows: Vec<String> = self
            .to_rows()
            .iter()
            .map(|r| r.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" "))
            .collect();
        format!("[{}]", rows.join("; "))
    }
}

#[inline]
fn sign(k: usize) -> f64 {
    if k % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPS)
    }
}

impl FromStr for Matrix {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        factory::parse_matrix(s)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        &self.data[self.offset(index.0, index.1)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Add<f64> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: f64) -> Self::Output {
        self.add_scalar(rhs)
    }
}

impl Sub<f64> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: f64) -> Self::Output {
        self.sub_scalar(rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_PRECISION))
    }
}
