//! Lagged design matrix and regressor names.
//!
//! For lag order `p` and `T` observations the regression uses rows
//! `p..T` of the series. Row `t` of the design matrix is
//!
//! ```text
//! [trend terms, y[t-1], y[t-2], ..., y[t-p]]
//! ```
//!
//! so column `trend + j*k + v` holds variable `v` at lag `j + 1`.

use ndarray::{Array2, ArrayView2, s};

use crate::error::EstimateError;
use crate::trend::Trend;

/// Builds the `(T - p) x (trend + k p)` design matrix `Z`.
///
/// # Errors
///
/// [`EstimateError::LagOrderTooLarge`] when `p >= T`.
pub fn design_matrix(
    y: ArrayView2<'_, f64>,
    lags: usize,
    trend: Trend,
) -> Result<Array2<f64>, EstimateError> {
    let (nobs_total, k) = y.dim();
    if lags >= nobs_total {
        return Err(EstimateError::LagOrderTooLarge {
            lags,
            nobs: nobs_total,
        });
    }
    let nobs = nobs_total - lags;
    let n_trend = trend.order();

    let mut z = Array2::zeros((nobs, n_trend + k * lags));
    z.slice_mut(s![.., ..n_trend]).assign(&trend.columns(nobs));
    for j in 0..lags {
        let start = n_trend + j * k;
        // lag j + 1 of rows lags..T
        z.slice_mut(s![.., start..start + k])
            .assign(&y.slice(s![lags - j - 1..nobs_total - j - 1, ..]));
    }
    Ok(z)
}

/// Regressor names in design-column order: `const`, `trend`, `trend**2`,
/// then `L{lag}.{name}` for every lag and variable.
pub fn coef_names(names: &[String], lags: usize, trend: Trend) -> Vec<String> {
    let mut out: Vec<String> = trend.names().iter().map(|s| s.to_string()).collect();
    for lag in 1..=lags {
        out.extend(names.iter().map(|name| format!("L{lag}.{name}")));
    }
    out
}
