use std::num::ParseFloatError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinalgError>;

/// Errors reported by vector and matrix operations.
///
/// Every error is raised synchronously at the offending call; none of them
/// are retried or recovered from inside the crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Cell ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Length mismatch: expected {expected}, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Shape mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Invalid shape {rows}x{cols}: {reason}")]
    InvalidShape {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    #[error("Division by zero")]
    DivideByZero,

    #[error("Cannot normalize a zero vector")]
    ZeroVector,

    #[error("Operation requires at least one element")]
    EmptyInput,

    #[error("Invalid numeric literal '{token}': {source}")]
    Parse {
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Unsupported shape {rows}x{cols}: only square transforms are supported")]
    UnsupportedShape { rows: usize, cols: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Matrix is singular (determinant is zero)")]
    Singular,
}

/// Coarse error category, one per failure class callers are expected to
/// distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Index,
    SizeMismatch,
    InvalidShape,
    DivideByZero,
    DegenerateInput,
    EmptyInput,
    Parse,
    UnsupportedShape,
    InvalidInput,
    Singular,
}

impl LinalgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinalgError::IndexOutOfBounds { .. } | LinalgError::CellOutOfBounds { .. } => {
                ErrorKind::Index
            }
            LinalgError::LengthMismatch { .. } | LinalgError::ShapeMismatch { .. } => {
                ErrorKind::SizeMismatch
            }
            LinalgError::InvalidShape { .. } => ErrorKind::InvalidShape,
            LinalgError::DivideByZero => ErrorKind::DivideByZero,
            LinalgError::ZeroVector => ErrorKind::DegenerateInput,
            LinalgError::EmptyInput => ErrorKind::EmptyInput,
            LinalgError::Parse { .. } => ErrorKind::Parse,
            LinalgError::UnsupportedShape { .. } => ErrorKind::UnsupportedShape,
            LinalgError::InvalidInput(_) => ErrorKind::InvalidInput,
            LinalgError::Singular => ErrorKind::Singular,
        }
    }
}
