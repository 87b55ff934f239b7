use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default element-wise equality tolerance.
pub const EPS: f64 = 1.0e-6;

/// Separates rows in a matrix literal.
pub const ROW_DELIMITER: char = ';';

/// Separates elements within a row (or a vector literal).
pub const COL_DELIMITER: char = ' ';

/// Digits after the decimal point used by `Display`.
pub const DEFAULT_PRECISION: usize = 3;

/// Central configuration for comparisons, rendering and inversion.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LinalgConfig {
    pub tolerance: f64,
    pub precision: usize,
    pub singular: SingularPolicy,
}

/// What `Matrix::inverse_with` does when the determinant is exactly zero.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularPolicy {
    /// Return `LinalgError::Singular`.
    #[default]
    Fail,
    /// Divide anyway and let `inf`/`NaN` flow into the result.
    Propagate,
}

impl FromStr for SingularPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(SingularPolicy::Fail),
            "propagate" => Ok(SingularPolicy::Propagate),
            _ => Err(format!(
                "Unknown singular policy: {}. Expected `fail` or `propagate`",
                s
            )),
        }
    }
}

impl LinalgConfig {
    pub fn new(tolerance: f64, precision: usize, singular: SingularPolicy) -> Self {
        Self {
            tolerance,
            precision,
            singular,
        }
    }

    /// Load a configuration from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: LinalgConfig =
            serde_json::from_str(json).context("failed to parse linalg config")?;
        if config.tolerance < 0.0 {
            anyhow::bail!("tolerance must be non-negative, got {}", config.tolerance);
        }
        Ok(config)
    }
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            tolerance: EPS,
            precision: DEFAULT_PRECISION,
            singular: SingularPolicy::Fail,
        }
    }
}
