//! Configuration for fitting a VAR model.

use crate::criteria::InfoCriterion;
use crate::error::EstimateError;
use crate::trend::Trend;

/// Configuration for [`Var::fit`](crate::Var::fit).
///
/// Without an information criterion, `max_lags` is used directly as the lag
/// order. With one, orders `0..=max_lags` are compared and the minimiser of
/// that criterion is estimated.
///
/// # Example
///
/// ```
/// use vecar_estimate::{InfoCriterion, Trend, VarConfig};
///
/// let config = VarConfig::new(8)
///     .with_ic(InfoCriterion::Bic)
///     .with_trend(Trend::ConstantLinear);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_lags(), Some(8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VarConfig {
    /// Lag order, or the upper bound of the search when `ic` is set.
    /// `None` means the default bound `round(12 (T/100)^(1/4))`.
    max_lags: Option<usize>,
    /// Criterion driving order selection.
    ic: Option<InfoCriterion>,
    /// Deterministic terms.
    trend: Trend,
}

impl VarConfig {
    /// Creates a configuration with the given lag order.
    ///
    /// Defaults: no order selection, `trend = Constant`.
    pub fn new(max_lags: usize) -> Self {
        Self {
            max_lags: Some(max_lags),
            ic: None,
            trend: Trend::Constant,
        }
    }

    /// Creates a configuration that selects the order by `ic` up to the
    /// default bound for the sample size.
    pub fn select_by(ic: InfoCriterion) -> Self {
        Self {
            max_lags: None,
            ic: Some(ic),
            trend: Trend::Constant,
        }
    }

    /// Sets the lag order or search bound.
    pub fn with_max_lags(mut self, max_lags: usize) -> Self {
        self.max_lags = Some(max_lags);
        self
    }

    /// Enables order selection by `ic`.
    pub fn with_ic(mut self, ic: InfoCriterion) -> Self {
        self.ic = Some(ic);
        self
    }

    /// Disables order selection; `max_lags` becomes the fixed lag order.
    pub fn without_ic(mut self) -> Self {
        self.ic = None;
        self
    }

    /// Sets the deterministic terms.
    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    /// Returns the lag order or search bound, if set.
    pub fn max_lags(&self) -> Option<usize> {
        self.max_lags
    }

    /// Returns the selection criterion, if any.
    pub fn ic(&self) -> Option<InfoCriterion> {
        self.ic
    }

    /// Returns the deterministic terms.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Validates this configuration.
    ///
    /// A fixed order needs `max_lags`; only order selection may fall back to
    /// the sample-size default.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.ic.is_none() && self.max_lags.is_none() {
            return Err(EstimateError::InvalidConfig {
                reason: "a lag order is required when no information criterion is set",
            });
        }
        Ok(())
    }
}

impl Default for VarConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Default search bound `round(12 (T/100)^(1/4))`.
pub fn default_max_lags(nobs: usize) -> usize {
    (12.0 * (nobs as f64 / 100.0).powf(0.25)).round() as usize
}
