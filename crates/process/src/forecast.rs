//! Minimum-MSE point forecasts, forecast-error covariances and Gaussian
//! forecast intervals.

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, s};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ProcessError;

/// Point forecast with symmetric Gaussian bounds, each `steps x k`.
#[derive(Clone, Debug)]
pub struct ForecastBundle {
    point: Array2<f64>,
    lower: Array2<f64>,
    upper: Array2<f64>,
    alpha: f64,
}

impl ForecastBundle {
    /// Returns the point forecasts.
    pub fn point(&self) -> &Array2<f64> {
        &self.point
    }

    /// Returns the lower interval bounds.
    pub fn lower(&self) -> &Array2<f64> {
        &self.lower
    }

    /// Returns the upper interval bounds.
    pub fn upper(&self) -> &Array2<f64> {
        &self.upper
    }

    /// Returns the significance level; the interval covers `1 - alpha`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the number of forecast steps.
    pub fn steps(&self) -> usize {
        self.point.nrows()
    }
}

/// Recursive forecasts `y(h) = nu + A_1 y(h-1) + ... + A_p y(h-p)` for
/// `h = 1..=steps`, seeded with the last `p` rows of `y`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ProcessError::DimensionMismatch`] | `y` does not have `k` columns |
/// | [`ProcessError::InsufficientHistory`] | `y` has fewer than `p` rows |
pub fn forecast(
    y: ArrayView2<'_, f64>,
    coefs: ArrayView3<'_, f64>,
    intercept: ArrayView1<'_, f64>,
    steps: usize,
) -> Result<Array2<f64>, ProcessError> {
    forecast_with(y, coefs, steps, |_| intercept.to_owned())
}

/// Recursive forecasts with a step-dependent intercept,
/// `y(h) = nu(h) + A_1 y(h-1) + ... + A_p y(h-p)`.
///
/// `intercept_at` is called with `h = 1..=steps` and must return a
/// length-`k` vector; deterministic trends enter through it.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ProcessError::DimensionMismatch`] | `y` does not have `k` columns |
/// | [`ProcessError::InsufficientHistory`] | `y` has fewer than `p` rows |
pub fn forecast_with<F>(
    y: ArrayView2<'_, f64>,
    coefs: ArrayView3<'_, f64>,
    steps: usize,
    intercept_at: F,
) -> Result<Array2<f64>, ProcessError>
where
    F: Fn(usize) -> Array1<f64>,
{
    let (p, k, _) = coefs.dim();
    if y.ncols() != k {
        return Err(ProcessError::DimensionMismatch {
            input: "forecast history",
            expected: k,
            got: y.ncols(),
        });
    }
    if y.nrows() < p {
        return Err(ProcessError::InsufficientHistory {
            got: y.nrows(),
            need: p,
        });
    }

    let n_hist = y.nrows();
    let mut forcs = Array2::zeros((steps, k));
    for h in 1..=steps {
        let mut f: Array1<f64> = intercept_at(h);
        for i in 1..=p {
            // h - i <= 0 reaches back into the observed history
            let prior = if h > i {
                forcs.row(h - i - 1).to_owned()
            } else {
                y.row(n_hist + h - i - 1).to_owned()
            };
            f += &coefs.slice(s![i - 1, .., ..]).dot(&prior);
        }
        forcs.row_mut(h - 1).assign(&f);
    }

    Ok(forcs)
}

/// Forecast-error covariances `Sigma_y(1), ..., Sigma_y(steps)` from MA
/// coefficients: `Sigma_y(h) = Sigma_y(h-1) + Phi_{h-1} Sigma_u Phi_{h-1}'`.
///
/// `ma_coefs` must hold at least `steps` matrices.
pub fn forecast_cov(
    ma_coefs: ArrayView3<'_, f64>,
    sigma_u: ArrayView2<'_, f64>,
    steps: usize,
) -> Array3<f64> {
    let k = sigma_u.nrows();
    let mut covs = Array3::zeros((steps, k, k));
    let mut prior = Array2::<f64>::zeros((k, k));
    for h in 0..steps {
        let phi = ma_coefs.slice(s![h, .., ..]);
        prior = prior + phi.dot(&sigma_u).dot(&phi.t());
        covs.slice_mut(s![h, .., ..]).assign(&prior);
    }
    covs
}

/// Standard-normal quantile `z_{1 - alpha/2}`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ProcessError::InvalidAlpha`] | `alpha` outside `(0, 1)` |
/// | [`ProcessError::Distribution`] | the normal distribution cannot be built |
pub fn norm_signif_level(alpha: f64) -> Result<f64, ProcessError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ProcessError::InvalidAlpha { alpha });
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| ProcessError::Distribution {
        message: e.to_string(),
    })?;
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Builds a [`ForecastBundle`] from point forecasts and the matching
/// `(steps, k, k)` forecast-error covariances.
///
/// # Errors
///
/// [`ProcessError::InvalidAlpha`] when `alpha` is outside `(0, 1)`.
pub fn interval_from_covs(
    point: Array2<f64>,
    covs: ArrayView3<'_, f64>,
    alpha: f64,
) -> Result<ForecastBundle, ProcessError> {
    let q = norm_signif_level(alpha)?;
    let half_width = Array2::from_shape_fn(point.dim(), |(h, i)| q * covs[[h, i, i]].sqrt());
    let lower = &point - &half_width;
    let upper = &point + &half_width;
    Ok(ForecastBundle {
        point,
        lower,
        upper,
        alpha,
    })
}
