//! Index-aware traversal over vectors and matrices.
//!
//! The iterators borrow the owning container's buffer and yield the value
//! together with its position. They are `Clone`, so a traversal can be
//! restarted from any point, and they always visit positions in ascending
//! order without skipping. Writes go through the owning type's `update`
//! passes, which visit positions in exactly the same order.

use std::iter::FusedIterator;

/// Yields `(index, value)` pairs of a vector in ascending index order.
#[derive(Clone, Debug)]
pub struct VectorCells<'a> {
    data: &'a [f64],
    index: usize,
}

impl<'a> VectorCells<'a> {
    pub(crate) fn new(data: &'a [f64]) -> Self {
        Self { data, index: 0 }
    }

    /// Index the next call to `next` will yield.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a> Iterator for VectorCells<'a> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.data.get(self.index)?;
        let index = self.index;
        self.index += 1;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VectorCells<'_> {}
impl FusedIterator for VectorCells<'_> {}

/// Yields `(row, col, value)` triples of a matrix in row-major order, so the
/// linear index `row * cols + col` is strictly ascending.
#[derive(Clone, Debug)]
pub struct MatrixCells<'a> {
    data: &'a [f64],
    cols: usize,
    index: usize,
}

impl<'a> MatrixCells<'a> {
    pub(crate) fn new(data: &'a [f64], cols: usize) -> Self {
        Self {
            data,
            cols,
            index: 0,
        }
    }

    /// Row-major linear index the next call to `next` will yield.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a> Iterator for MatrixCells<'a> {
    type Item = (usize, usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        // A non-empty buffer implies cols > 0.
        let value = *self.data.get(self.index)?;
        let (row, col) = (self.index / self.cols, self.index % self.cols);
        self.index += 1;
        Some((row, col, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MatrixCells<'_> {}
impl FusedIterator for MatrixCells<'_> {}

/// A single row or column of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Col(usize),
}

impl Line {
    /// Flat offset of the `k`-th element along this line.
    #[inline]
    pub(crate) fn offset(self, k: usize, cols: usize) -> usize {
        match self {
            Line::Row(i) => i * cols + k,
            Line::Col(j) => k * cols + j,
        }
    }

    /// Number of elements along this line in a `rows x cols` matrix.
    #[inline]
    pub(crate) fn len(self, rows: usize, cols: usize) -> usize {
        match self {
            Line::Row(_) => cols,
            Line::Col(_) => rows,
        }
    }
}

/// Walks one row or one column, yielding `(index, value)` along the free
/// dimension.
#[derive(Clone, Debug)]
pub struct MatrixLine<'a> {
    data: &'a [f64],
    cols: usize,
    line: Line,
    index: usize,
    len: usize,
}

impl<'a> MatrixLine<'a> {
    /// The caller guarantees the line lies inside the matrix.
    pub(crate) fn new(data: &'a [f64], rows: usize, cols: usize, line: Line) -> Self {
        Self {
            data,
            cols,
            line,
            index: 0,
            len: line.len(rows, cols),
        }
    }

    pub fn line(&self) -> Line {
        self.line
    }
}

impl<'a> Iterator for MatrixLine<'a> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let k = self.index;
        self.index += 1;
        Some((k, self.data[self.line.offset(k, self.cols)]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MatrixLine<'_> {}
impl FusedIterator for MatrixLine<'_> {}
