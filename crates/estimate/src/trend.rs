//! Deterministic trend terms prepended to the VAR design matrix.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::error::EstimateError;

/// Deterministic regressors included in every equation.
///
/// Each variant adds `order()` leading columns `[1, t, t^2]` (truncated) to
/// the design matrix, with `t = 1..=nobs` counting the usable rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Trend {
    /// No deterministic terms (`"nc"`).
    None,
    /// Intercept only (`"c"`).
    #[default]
    Constant,
    /// Intercept and linear trend (`"ct"`).
    ConstantLinear,
    /// Intercept, linear and quadratic trend (`"ctt"`).
    ConstantQuadratic,
}

impl Trend {
    /// All variants in increasing order.
    pub const ALL: [Trend; 4] = [
        Trend::None,
        Trend::Constant,
        Trend::ConstantLinear,
        Trend::ConstantQuadratic,
    ];

    /// Number of deterministic columns.
    pub fn order(self) -> usize {
        match self {
            Trend::None => 0,
            Trend::Constant => 1,
            Trend::ConstantLinear => 2,
            Trend::ConstantQuadratic => 3,
        }
    }

    /// Whether the first deterministic column is an intercept.
    pub fn has_constant(self) -> bool {
        self != Trend::None
    }

    /// Short tag used in `FromStr`.
    pub fn tag(self) -> &'static str {
        match self {
            Trend::None => "nc",
            Trend::Constant => "c",
            Trend::ConstantLinear => "ct",
            Trend::ConstantQuadratic => "ctt",
        }
    }

    /// Builds the `nobs x order()` block of deterministic regressors.
    pub fn columns(self, nobs: usize) -> Array2<f64> {
        Array2::from_shape_fn((nobs, self.order()), |(row, power)| {
            ((row + 1) as f64).powi(power as i32)
        })
    }

    /// Names of the deterministic regressors, in column order.
    pub fn names(self) -> &'static [&'static str] {
        const NAMES: [&str; 3] = ["const", "trend", "trend**2"];
        &NAMES[..self.order()]
    }

    /// One-step transition of the deterministic block.
    ///
    /// Advancing `t` to `t + 1` maps `[1, t, t^2]` to
    /// `[1, t + 1, t^2 + 2t + 1]`, a lower-triangular Pascal matrix.
    pub fn transition(self) -> Array2<f64> {
        let n = self.order();
        Array2::from_shape_fn((n, n), |(i, j)| binomial(i, j))
    }
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Trend {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nc" | "n" => Ok(Trend::None),
            "c" => Ok(Trend::Constant),
            "ct" => Ok(Trend::ConstantLinear),
            "ctt" => Ok(Trend::ConstantQuadratic),
            _ => Err(EstimateError::UnknownTrend {
                value: s.to_string(),
            }),
        }
    }
}
