//! Estimated VAR model and its inference quantities.

use std::ops::Deref;
use std::sync::OnceLock;

use chrono::NaiveDate;
use ndarray::{Array1, Array2, ArrayView2, s};
use statrs::distribution::{ContinuousCDF, StudentsT};
use vecar_process::{MultivariateSeries, VarProcess, linalg};

use crate::criteria::InfoCriteria;
use crate::design::coef_names;
use crate::error::EstimateError;
use crate::trend::Trend;

/// A fitted VAR(p) model.
///
/// Holds the estimated [`VarProcess`] and dereferences to it, so every
/// process method (`is_stable`, `ma_rep`, `acf`, ...) is available directly.
/// [`VarResults::forecast`], [`VarResults::forecast_cov`] and
/// [`VarResults::forecast_interval`] shadow the process versions: they
/// continue linear and quadratic trends and add the parameter-uncertainty
/// correction.
///
/// Inference quantities are computed on first access and cached.
#[derive(Debug, Clone)]
pub struct VarResults {
    process: VarProcess,
    endog: Array2<f64>,
    dates: Option<Vec<NaiveDate>>,
    z: Array2<f64>,
    params: Array2<f64>,
    resid: Array2<f64>,
    lags: usize,
    trend: Trend,
    coef_names: Vec<String>,
    gram: OnceLock<Array2<f64>>,
    gram_inv: OnceLock<Result<Array2<f64>, EstimateError>>,
    cov_params: OnceLock<Result<Array2<f64>, EstimateError>>,
    stderr: OnceLock<Result<Array2<f64>, EstimateError>>,
    pvalues: OnceLock<Result<Array2<f64>, EstimateError>>,
    logdet_mle: OnceLock<Result<f64, EstimateError>>,
    detomega: OnceLock<f64>,
}

impl Deref for VarResults {
    type Target = VarProcess;

    fn deref(&self) -> &VarProcess {
        &self.process
    }
}

impl VarResults {
    pub(crate) fn new(
        process: VarProcess,
        series: &MultivariateSeries,
        z: Array2<f64>,
        params: Array2<f64>,
        resid: Array2<f64>,
        lags: usize,
        trend: Trend,
    ) -> Self {
        let coef_names = coef_names(series.names(), lags, trend);
        Self {
            process,
            endog: series.data().to_owned(),
            dates: series.dates().map(<[NaiveDate]>::to_vec),
            z,
            params,
            resid,
            lags,
            trend,
            coef_names,
            gram: OnceLock::new(),
            gram_inv: OnceLock::new(),
            cov_params: OnceLock::new(),
            stderr: OnceLock::new(),
            pvalues: OnceLock::new(),
            logdet_mle: OnceLock::new(),
            detomega: OnceLock::new(),
        }
    }

    /// Returns the estimated process.
    pub fn process(&self) -> &VarProcess {
        &self.process
    }

    /// Returns the full observed series, presample included.
    pub fn endog(&self) -> ArrayView2<'_, f64> {
        self.endog.view()
    }

    /// Returns the observation dates, if the series had any.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// Returns the `nobs x df_model` design matrix.
    pub fn design(&self) -> ArrayView2<'_, f64> {
        self.z.view()
    }

    /// Returns the `df_model x k` stacked coefficients `[trend; A_1'; ...; A_p']`.
    pub fn params(&self) -> &Array2<f64> {
        &self.params
    }

    /// Returns the `nobs x k` residuals.
    pub fn resid(&self) -> &Array2<f64> {
        &self.resid
    }

    /// Returns the deterministic terms.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Returns the regressor names in row order of [`VarResults::params`].
    pub fn coef_names(&self) -> &[String] {
        &self.coef_names
    }

    /// Total observations including the `p` presample rows.
    pub fn total_obs(&self) -> usize {
        self.endog.nrows()
    }

    /// Effective observations `T - p`.
    pub fn nobs(&self) -> usize {
        self.z.nrows()
    }

    /// Regressors per equation, `k p + trend order`.
    pub fn df_model(&self) -> usize {
        self.z.ncols()
    }

    /// Residual degrees of freedom, `nobs - df_model`.
    pub fn df_resid(&self) -> usize {
        self.nobs() - self.df_model()
    }

    /// Lag order used for estimation.
    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Maximum-likelihood noise covariance `Sigma_u * df_resid / nobs`.
    pub fn sigma_u_mle(&self) -> Array2<f64> {
        self.sigma_u() * (self.df_resid() as f64 / self.nobs() as f64)
    }

    /// Determinant of `Sigma_u`.
    pub fn detomega(&self) -> f64 {
        *self
            .detomega
            .get_or_init(|| linalg::to_dmatrix(self.sigma_u().view()).determinant())
    }

    /// Gram matrix `Z'Z`.
    pub fn gram(&self) -> &Array2<f64> {
        self.gram.get_or_init(|| self.z.t().dot(&self.z))
    }

    /// Inverse of the Gram matrix.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] wrapping a singular-matrix error when the
    /// design is rank deficient.
    pub fn gram_inv(&self) -> Result<&Array2<f64>, EstimateError> {
        self.gram_inv
            .get_or_init(|| {
                let inv = linalg::inverse(linalg::to_dmatrix(self.gram().view()), "Gram matrix Z'Z")?;
                Ok(linalg::from_dmatrix(&inv))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Covariance of `vec(B')`: `(Z'Z)^{-1} ⊗ Sigma_u`.
    ///
    /// Entry `r * k + i` belongs to regressor `r` in equation `i`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Z'Z` is singular.
    pub fn cov_params(&self) -> Result<&Array2<f64>, EstimateError> {
        self.cov_params
            .get_or_init(|| {
                let gram_inv = linalg::to_dmatrix(self.gram_inv()?.view());
                let sigma = linalg::to_dmatrix(self.sigma_u().view());
                Ok(linalg::from_dmatrix(&gram_inv.kronecker(&sigma)))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Covariance of the lag coefficients alone, dropping the deterministic
    /// rows and columns of [`VarResults::cov_params`].
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Z'Z` is singular.
    pub fn cov_alpha(&self) -> Result<Array2<f64>, EstimateError> {
        let start = self.trend.order() * self.k();
        Ok(self.cov_params()?.slice(s![start.., start..]).to_owned())
    }

    /// Standard errors shaped like [`VarResults::params`].
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Z'Z` is singular.
    pub fn stderr(&self) -> Result<&Array2<f64>, EstimateError> {
        self.stderr
            .get_or_init(|| {
                let cov = self.cov_params()?;
                let k = self.k();
                Ok(Array2::from_shape_fn(self.params.dim(), |(r, i)| {
                    cov[[r * k + i, r * k + i]].sqrt()
                }))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// t statistics `params / stderr`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Z'Z` is singular.
    pub fn tvalues(&self) -> Result<Array2<f64>, EstimateError> {
        Ok(&self.params / self.stderr()?)
    }

    /// Two-sided p-values of the t statistics against Student's t with
    /// `df_resid` degrees of freedom.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::Process`] | `Z'Z` is singular |
    /// | [`EstimateError::Distribution`] | the t distribution cannot be built |
    pub fn pvalues(&self) -> Result<&Array2<f64>, EstimateError> {
        self.pvalues
            .get_or_init(|| {
                let dist = StudentsT::new(0.0, 1.0, self.df_resid() as f64).map_err(|e| {
                    EstimateError::Distribution {
                        message: e.to_string(),
                    }
                })?;
                Ok(self.tvalues()?.mapv(|t| 2.0 * dist.sf(t.abs())))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// `ln|Sigma_u_mle|`.
    fn logdet_mle(&self) -> Result<f64, EstimateError> {
        self.logdet_mle
            .get_or_init(|| {
                let ld = linalg::logdet(
                    linalg::to_dmatrix(self.sigma_u_mle().view()),
                    "maximum-likelihood noise covariance",
                )?;
                Ok(ld)
            })
            .as_ref()
            .copied()
            .map_err(Clone::clone)
    }

    /// Gaussian log-likelihood
    /// `-(T k / 2) ln(2 pi) - (T / 2)(ln|Sigma_u_mle| + k)`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Sigma_u_mle` is not positive
    /// definite.
    pub fn loglike(&self) -> Result<f64, EstimateError> {
        let t = self.nobs() as f64;
        let k = self.k() as f64;
        let ld = self.logdet_mle()?;
        Ok(-(t * k / 2.0) * (2.0 * std::f64::consts::PI).ln() - (t / 2.0) * (ld + k))
    }

    /// AIC, BIC, HQIC and FPE of this fit.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Sigma_u_mle` is not positive
    /// definite.
    pub fn info_criteria(&self) -> Result<InfoCriteria, EstimateError> {
        let k = self.k();
        let free_params = self.lags * k * k + k * self.trend.order();
        Ok(InfoCriteria::compute(
            self.logdet_mle()?,
            self.nobs(),
            k,
            self.df_model(),
            self.df_resid(),
            free_params,
        ))
    }

    /// Deterministic part of the intercept for forecast step `h >= 1`,
    /// continuing `t` past the end of the sample.
    pub(crate) fn deterministic_intercept(&self, h: usize) -> Array1<f64> {
        let t = (self.nobs() + h) as f64;
        let n_trend = self.trend.order();
        let mut nu = Array1::zeros(self.k());
        for d in 0..n_trend {
            nu.scaled_add(t.powi(d as i32), &self.params.row(d));
        }
        nu
    }
}
