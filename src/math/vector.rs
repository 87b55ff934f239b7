use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use std::str::FromStr;

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PRECISION, EPS};
use crate::error::{LinalgError, Result};
use crate::factory;
use crate::math::traversal::VectorCells;
use crate::math::{approx_eq, buffer, Matrix};

/// Fixed-length ordered sequence of real numbers.
///
/// The length is set at construction and never changes for a given value;
/// every arithmetic operation returns a new `Vector`. Only `set`,
/// `update` and `IndexMut` write into an existing one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Take ownership of `data` without copying it.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Copy `data` into a new vector.
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }

    pub fn filled(len: usize, value: f64) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// `ceil((end - start) / step)` elements starting at `start`.
    pub fn range(start: f64, end: f64, step: f64) -> Result<Self> {
        factory::range(start, end, step)
    }

    /// `range(start, end, 1.0)`.
    pub fn range_from(start: f64, end: f64) -> Result<Self> {
        factory::range(start, end, 1.0)
    }

    /// `range(0.0, end, 1.0)`.
    pub fn range_to(end: f64) -> Result<Self> {
        factory::range(0.0, end, 1.0)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(LinalgError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// First element.
    pub fn head(&self) -> Result<f64> {
        self.data.first().copied().ok_or(LinalgError::EmptyInput)
    }

    /// Last element.
    pub fn tail(&self) -> Result<f64> {
        self.data.last().copied().ok_or(LinalgError::EmptyInput)
    }

    /// `(index, value)` pairs in ascending index order.
    pub fn cells(&self) -> VectorCells<'_> {
        VectorCells::new(&self.data)
    }

    /// Replace every element with `f(index, old)`, visiting indices in
    /// ascending order.
    pub fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, f64) -> f64,
    {
        for i in 0..self.data.len() {
            self.data[i] = f(i, self.data[i]);
        }
    }

    pub fn map<F>(&self, mut f: F) -> Vector
    where
        F: FnMut(f64) -> f64,
    {
        let mut res = self.clone();
        res.update(|_, x| f(x));
        res
    }

    fn zip_with<F>(&self, other: &Vector, mut f: F) -> Result<Vector>
    where
        F: FnMut(f64, f64) -> f64,
    {
        self.check_len(other)?;
        let mut res = self.clone();
        res.update(|i, x| f(x, other.data[i]));
        Ok(res)
    }

    fn check_len(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(LinalgError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        Ok(())
    }

    /// True iff every element is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| x.is_zero())
    }

    pub fn add_scalar(&self, a: f64) -> Vector {
        self.map(|x| x + a)
    }

    pub fn sub_scalar(&self, a: f64) -> Vector {
        self.map(|x| x - a)
    }

    /// Multiply every element by `a`.
    pub fn scale(&self, a: f64) -> Vector {
        self.map(|x| x * a)
    }

    pub fn div_scalar(&self, a: f64) -> Result<Vector> {
        if a == 0.0 {
            return Err(LinalgError::DivideByZero);
        }
        Ok(self.map(|x| x / a))
    }

    pub fn negate(&self) -> Vector {
        self.map(|x| -x)
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Element-wise product.
    pub fn mul(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Row transform: element `i` of the result is `self . matrix.row(i)`.
    ///
    /// Only square matrices with `cols == self.len()` are supported.
    pub fn mul_matrix(&self, matrix: &Matrix) -> Result<Vector> {
        let n = self.len();
        if !matrix.is_square() || matrix.cols() != n {
            return Err(LinalgError::ShapeMismatch {
                left: matrix.shape(),
                right: (n, n),
            });
        }
        Ok(matrix.rows_dot(self))
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len(other)?;
        Ok(dot_slices(&self.data, &other.data))
    }

    pub fn norm_sq(&self) -> f64 {
        dot_slices(&self.data, &self.data)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Sum of absolute values.
    pub fn manhattan_norm(&self) -> f64 {
        self.data.iter().map(|x| x.abs()).sum()
    }

    /// Largest absolute value. Undefined for the empty vector.
    pub fn infinity_norm(&self) -> Result<f64> {
        self.abs_max()
    }

    fn abs_max(&self) -> Result<f64> {
        let mut iter = self.data.iter().map(|x| x.abs());
        let seed = iter.next().ok_or(LinalgError::EmptyInput)?;
        Ok(iter.fold(seed, |m, x| if x > m { x } else { m }))
    }

    /// Angle in radians between `self` and `other`.
    ///
    /// If either vector is zero the quotient is `0 / 0` and the result is
    /// `NaN`; this is not reported as an error.
    pub fn angle(&self, other: &Vector) -> Result<f64> {
        let cos = self.dot(other)? / (self.norm() * other.norm());
        Ok(cos.clamp(-1.0, 1.0).acos())
    }

    pub fn normalize(&self) -> Result<Vector> {
        if self.is_zero() {
            return Err(LinalgError::ZeroVector);
        }
        Ok(self.scale(1.0 / self.norm()))
    }

    pub fn distance_sq(&self, other: &Vector) -> Result<f64> {
        Ok(self.sub(other)?.norm_sq())
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &Vector) -> Result<f64> {
        Ok(self.distance_sq(other)?.sqrt())
    }

    pub fn manhattan_distance(&self, other: &Vector) -> Result<f64> {
        Ok(self.sub(other)?.manhattan_norm())
    }

    /// Largest per-component difference.
    pub fn chebyshev_distance(&self, other: &Vector) -> Result<f64> {
        self.sub(other)?.abs_max()
    }

    pub fn min(&self) -> Result<f64> {
        let mut iter = self.data.iter().copied();
        let seed = iter.next().ok_or(LinalgError::EmptyInput)?;
        Ok(iter.fold(seed, |m, x| if x < m { x } else { m }))
    }

    pub fn max(&self) -> Result<f64> {
        let mut iter = self.data.iter().copied();
        let seed = iter.next().ok_or(LinalgError::EmptyInput)?;
        Ok(iter.fold(seed, |m, x| if x > m { x } else { m }))
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Vector) -> Vector {
        Vector::from_vec(buffer::join(&self.data, &other.data))
    }

    /// New vector without the element at `index`.
    pub fn remove(&self, index: usize) -> Result<Vector> {
        self.get(index)?;
        Ok(Vector::from_vec(buffer::remove(&self.data, index)))
    }

    /// New vector with `values` spliced in before `index`.
    pub fn insert(&self, index: usize, values: &[f64]) -> Result<Vector> {
        if index > self.len() {
            return Err(LinalgError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(Vector::from_vec(buffer::insert(&self.data, index, values)))
    }

    /// Equal length and every pair of elements within `tolerance`.
    pub fn approx_eq(&self, other: &Vector, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| approx_eq(a, b, tolerance))
    }

    /// Pretty-print one element per line with `precision` decimals.
    pub fn render(&self, precision: usize) -> String {
        if self.is_empty() {
            return "[]".to_string();
        }
        let lines: Vec<String> = self
            .data
            .iter()
            .map(|x| format!("{:>w$.p$}", x, w = precision + 3, p = precision))
            .collect();
        let width = lines.iter().map(|s| s.len()).max().unwrap_or(0);
        let mut out = String::from("[");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push_str("\n ");
            }
            out.push_str(&format!("{:>w$}", line, w = width));
        }
        out.push(']');
        out
    }

    /// Literal form accepted by `FromStr`, e.g. `[1 2.5 -3]`.
    pub fn to_literal(&self) -> String {
        let tokens: Vec<String> = self.data.iter().map(|x| x.to_string()).collect();
        format!("[{}]", tokens.join(" "))
    }
}

pub(crate) fn dot_slices(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPS)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<&[f64]> for Vector {
    fn from(value: &[f64]) -> Self {
        Vector::from_slice(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl FromStr for Vector {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        factory::parse_vector(s)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Add<f64> for &Vector {
    type Output = Vector;

    fn add(self, rhs: f64) -> Self::Output {
        self.add_scalar(rhs)
    }
}

impl Sub<f64> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: f64) -> Self::Output {
        self.sub_scalar(rhs)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_PRECISION))
    }
}
