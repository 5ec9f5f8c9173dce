//! Forecasts from an estimated model, with the finite-sample correction for
//! parameter uncertainty.
//!
//! The corrected forecast-error covariance is
//!
//! ```text
//! Sigma_yhat(h) = Sigma_y(h) + Omega(h) / T
//! Omega(h)      = sum_{i,j < h} tr(B^{h-1-i}' G^{-1} B^{h-1-j} G) Phi_i Sigma_u Phi_j'
//! ```
//!
//! with `G = Z'Z` and `B` the one-step transition of the regressor vector
//! `Z[t] = (deterministic terms, y[t-1], ..., y[t-p])`.

use nalgebra::DMatrix;
use ndarray::{Array2, Array3, ArrayView2, s};
use tracing::debug;
use vecar_process::{ForecastBundle, forecast_with, interval_from_covs, linalg};

use crate::error::EstimateError;
use crate::results::VarResults;

impl VarResults {
    /// Transition matrix `B` of the regressor vector.
    ///
    /// ```text
    ///     | D    0              0 |   deterministic block (Pascal)
    /// B = |      params'          |   next y
    ///     | 0    I_{k(p-1)}     0 |   lag shift
    /// ```
    pub fn regressor_transition(&self) -> Array2<f64> {
        let n = self.df_model();
        let n_trend = self.trend().order();
        let k = self.k();
        let p = self.p();
        let mut b = Array2::zeros((n, n));
        b.slice_mut(s![..n_trend, ..n_trend])
            .assign(&self.trend().transition());
        if p > 0 {
            b.slice_mut(s![n_trend..n_trend + k, ..])
                .assign(&self.params().t());
            for r in 0..k * (p - 1) {
                b[[n_trend + k + r, n_trend + r]] = 1.0;
            }
        }
        b
    }

    /// `Omega(1), ..., Omega(steps)` as a `(steps, k, k)` array.
    ///
    /// Powers of `B` and the trace weights are computed once per call and
    /// shared across horizons.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Z'Z` is singular.
    pub fn omega(&self, steps: usize) -> Result<Array3<f64>, EstimateError> {
        let k = self.k();
        let g = linalg::to_dmatrix(self.gram().view());
        let g_inv = linalg::to_dmatrix(self.gram_inv()?.view());
        let b = linalg::to_dmatrix(self.regressor_transition().view());

        let mut powers: Vec<DMatrix<f64>> = Vec::with_capacity(steps);
        if steps > 0 {
            powers.push(DMatrix::identity(b.nrows(), b.ncols()));
        }
        for i in 1..steps {
            powers.push(&b * &powers[i - 1]);
        }
        let left: Vec<DMatrix<f64>> = powers.iter().map(|bp| bp.transpose() * &g_inv).collect();
        let right: Vec<DMatrix<f64>> = powers.iter().map(|bp| bp * &g).collect();
        // weights[a][c] = tr(B^a' G^-1 B^c G)
        let weights: Vec<Vec<f64>> = left
            .iter()
            .map(|l| right.iter().map(|r| (l * r).trace()).collect())
            .collect();

        let phis = self.ma_rep(steps.saturating_sub(1));
        let sigma = self.sigma_u();
        // Phi_i Sigma_u Phi_j' for every pair, reused across horizons
        let mut cross = vec![vec![Array2::<f64>::zeros((k, k)); steps]; steps];
        for i in 0..steps {
            let left_i = phis.slice(s![i, .., ..]).dot(sigma);
            for j in 0..steps {
                cross[i][j] = left_i.dot(&phis.slice(s![j, .., ..]).t());
            }
        }

        let mut omegas = Array3::zeros((steps, k, k));
        for h in 1..=steps {
            let mut om = Array2::<f64>::zeros((k, k));
            for i in 0..h {
                for j in 0..h {
                    om.scaled_add(weights[h - 1 - i][h - 1 - j], &cross[i][j]);
                }
            }
            omegas.slice_mut(s![h - 1, .., ..]).assign(&om);
        }
        debug!(steps, df_model = self.df_model(), "computed Omega(h)");
        Ok(omegas)
    }

    /// Forecast-error covariances corrected for estimation uncertainty,
    /// `mse(h) + Omega(h) / T`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when `Z'Z` is singular.
    pub fn forecast_cov(&self, steps: usize) -> Result<Array3<f64>, EstimateError> {
        let mse = self.mse(steps);
        let omegas = self.omega(steps)?;
        Ok(mse + omegas / self.nobs() as f64)
    }

    /// Point forecasts for `steps` periods after the last `p` rows of `y`.
    ///
    /// Linear and quadratic trend terms continue past the end of the
    /// estimation sample, so `y` is expected to end where the sample ends.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::Process`] | `y` has the wrong width or fewer than `p` rows |
    pub fn forecast(&self, y: ArrayView2<'_, f64>, steps: usize) -> Result<Array2<f64>, EstimateError> {
        Ok(forecast_with(y, self.coefs(), steps, |h| {
            self.deterministic_intercept(h)
        })?)
    }

    /// Forecasts from the end of the estimation sample.
    ///
    /// # Errors
    ///
    /// Same as [`VarResults::forecast`].
    pub fn forecast_from_sample(&self, steps: usize) -> Result<Array2<f64>, EstimateError> {
        self.forecast(self.endog(), steps)
    }

    /// Gaussian forecast intervals based on [`VarResults::forecast_cov`].
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::Process`] | invalid `alpha`, bad history, or singular `Z'Z` |
    pub fn forecast_interval(
        &self,
        y: ArrayView2<'_, f64>,
        steps: usize,
        alpha: f64,
    ) -> Result<ForecastBundle, EstimateError> {
        let point = self.forecast(y, steps)?;
        let covs = self.forecast_cov(steps)?;
        Ok(interval_from_covs(point, covs.view(), alpha)?)
    }
}
