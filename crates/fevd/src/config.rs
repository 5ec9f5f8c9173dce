//! Configuration for variance decompositions.

use ndarray::Array2;

use crate::error::FevdError;

/// Configuration for [`Fevd::new`](crate::Fevd::new).
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use vecar_fevd::FevdConfig;
///
/// let config = FevdConfig::new(10).with_decomposition(array![[1.0, 0.0], [0.5, 1.0]]);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.periods(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FevdConfig {
    /// Number of horizons `1..=periods`.
    periods: usize,
    /// Factor `P` with `Sigma_u = P P'`; `None` means the lower Cholesky
    /// factor of `Sigma_u`.
    decomposition: Option<Array2<f64>>,
}

impl FevdConfig {
    /// Creates a configuration over `periods` horizons with the Cholesky
    /// decomposition.
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            decomposition: None,
        }
    }

    /// Sets the number of horizons.
    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    /// Uses `p` instead of the Cholesky factor to orthogonalise shocks.
    pub fn with_decomposition(mut self, p: Array2<f64>) -> Self {
        self.decomposition = Some(p);
        self
    }

    /// Returns the number of horizons.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Returns the custom decomposition factor, if any.
    pub fn decomposition(&self) -> Option<&Array2<f64>> {
        self.decomposition.as_ref()
    }

    /// Validates this configuration.
    ///
    /// Whether the factor matches the process dimension is checked when the
    /// decomposition is computed.
    pub fn validate(&self) -> Result<(), FevdError> {
        if self.periods < 1 {
            return Err(FevdError::InvalidPeriods {
                periods: self.periods,
            });
        }
        if let Some(p) = &self.decomposition {
            if p.nrows() != p.ncols() {
                return Err(FevdError::NonSquareDecomposition {
                    rows: p.nrows(),
                    cols: p.ncols(),
                });
            }
            if p.iter().any(|v| !v.is_finite()) {
                return Err(FevdError::NonFiniteDecomposition);
            }
        }
        Ok(())
    }
}

impl Default for FevdConfig {
    fn default() -> Self {
        Self::new(10)
    }
}
