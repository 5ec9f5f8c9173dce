//! Least-squares estimation of a VAR(p) model.

use ndarray::{Array1, Array2, Array3, s};
use tracing::{debug, info};
use vecar_process::{MultivariateSeries, VarProcess, linalg};

use crate::config::{VarConfig, default_max_lags};
use crate::design::design_matrix;
use crate::error::EstimateError;
use crate::results::VarResults;
use crate::selection::{OrderSelection, select_order};
use crate::trend::Trend;

/// A VAR model bound to an observed series, ready to be estimated.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use vecar_estimate::{Trend, Var};
/// use vecar_process::MultivariateSeries;
///
/// let data = Array2::from_shape_fn((60, 2), |(t, i)| ((t * (i + 3)) % 7) as f64);
/// let model = Var::new(MultivariateSeries::new(data).unwrap());
/// let results = model.estimate(2, Trend::Constant).unwrap();
/// assert_eq!(results.p(), 2);
/// assert_eq!(results.df_model(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Var {
    series: MultivariateSeries,
}

impl Var {
    /// Creates a model for a validated series.
    pub fn new(series: MultivariateSeries) -> Self {
        Self { series }
    }

    /// Creates a model from a raw `T x k` array with default names.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`MultivariateSeries::new`].
    pub fn from_array(data: Array2<f64>) -> Result<Self, EstimateError> {
        Ok(Self::new(MultivariateSeries::new(data)?))
    }

    /// Returns the observed series.
    pub fn series(&self) -> &MultivariateSeries {
        &self.series
    }

    /// Returns the number of observations `T`.
    pub fn nobs(&self) -> usize {
        self.series.nobs()
    }

    /// Returns the number of equations `k`.
    pub fn k(&self) -> usize {
        self.series.k()
    }

    /// Fits the model as described by `config`.
    ///
    /// With an information criterion, orders `0..=max_lags` are compared
    /// first and the model is estimated at the selected order.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::InvalidConfig`] | neither a lag order nor a criterion is set |
    /// | [`EstimateError::NoCandidateOrder`] | every candidate order failed |
    /// | any error of [`Var::estimate`] | estimation at the chosen order failed |
    pub fn fit(&self, config: &VarConfig) -> Result<VarResults, EstimateError> {
        config.validate()?;
        let lags = match config.ic() {
            Some(ic) => {
                let selection = self.select_order(config.max_lags(), config.trend())?;
                let lags = selection.selected(ic);
                info!(ic = %ic, lags, "selected lag order");
                lags
            }
            None => config
                .max_lags()
                .ok_or(EstimateError::InvalidConfig {
                    reason: "a lag order is required when no information criterion is set",
                })?,
        };
        self.estimate(lags, config.trend())
    }

    /// Estimates a VAR(`lags`) with the given deterministic terms by least
    /// squares.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::LagOrderTooLarge`] | `lags >= T` |
    /// | [`EstimateError::InsufficientObservations`] | `T - p <= k p + trend order` |
    /// | [`EstimateError::Process`] | the least-squares solve failed |
    #[tracing::instrument(skip_all, fields(lags = lags, trend = %trend, k = self.k()))]
    pub fn estimate(&self, lags: usize, trend: Trend) -> Result<VarResults, EstimateError> {
        let y = self.series.data();
        let k = self.k();
        let z = design_matrix(y, lags, trend)?;
        let nobs = z.nrows();
        let df_model = z.ncols();
        if nobs <= df_model {
            return Err(EstimateError::InsufficientObservations {
                nobs,
                params: df_model,
                lags,
            });
        }
        let df_resid = nobs - df_model;

        let y_sample = y.slice(s![lags.., ..]).to_owned();
        let params = linalg::from_dmatrix(&linalg::lstsq(
            linalg::to_dmatrix(z.view()),
            &linalg::to_dmatrix(y_sample.view()),
        )?);
        let resid = &y_sample - &z.dot(&params);

        let sse = resid.t().dot(&resid);
        // symmetrise away rounding so the covariance passes validation
        let sigma_u = (&sse + &sse.t()) / (2.0 * df_resid as f64);

        let n_trend = trend.order();
        let coefs = Array3::from_shape_fn((lags, k, k), |(j, i, v)| {
            params[[n_trend + j * k + v, i]]
        });
        let intercept = if trend.has_constant() {
            params.row(0).to_owned()
        } else {
            Array1::zeros(k)
        };

        let process = VarProcess::new(coefs, intercept, sigma_u)?
            .with_names(self.series.names().iter().cloned())?;
        debug!(nobs, df_model, df_resid, "estimated VAR");

        Ok(VarResults::new(
            process,
            &self.series,
            z,
            params,
            resid,
            lags,
            trend,
        ))
    }

    /// Compares information criteria over orders `0..=max_lags`.
    ///
    /// `max_lags` defaults to `round(12 (T/100)^(1/4))`. Orders that cannot
    /// be estimated score `+inf` on every criterion.
    ///
    /// # Errors
    ///
    /// [`EstimateError::NoCandidateOrder`] when no order can be estimated.
    pub fn select_order(
        &self,
        max_lags: Option<usize>,
        trend: Trend,
    ) -> Result<OrderSelection, EstimateError> {
        let max_lags = max_lags.unwrap_or_else(|| default_max_lags(self.nobs()));
        select_order(self, max_lags, trend)
    }
}
