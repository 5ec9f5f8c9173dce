//! Autocovariance function of a stable VAR(p) process.
//!
//! Lags `0..p` come from the stacked (companion) process covariance `S`,
//! which solves the discrete Lyapunov equation `S = A S A' + Sigma_U`. In
//! vectorised form
//!
//! ```text
//! (I_{(kp)^2} - A ⊗ A) vec(S) = vec(Sigma_U)
//! ```
//!
//! is solved directly. Block `(0, h)` of `S` is `Gamma(h)`. Higher lags follow
//! the Yule-Walker recursion `Gamma(h) = A_1 Gamma(h-1) + ... + A_p Gamma(h-p)`.
//!
//! Stability is a precondition, not checked here: for a unit-root or
//! explosive process the linear system is singular or meaningless.

use nalgebra::DMatrix;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, s};

use crate::error::ProcessError;
use crate::linalg;
use crate::stability::companion_matrix;

/// Computes `Gamma(0), ..., Gamma(nlags)` as a `(nlags + 1, k, k)` array.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ProcessError::SingularMatrix`] | the Lyapunov system is singular (unit root) |
pub fn var_acf(
    coefs: ArrayView3<'_, f64>,
    sigma_u: ArrayView2<'_, f64>,
    nlags: usize,
) -> Result<Array3<f64>, ProcessError> {
    let (p, k, _) = coefs.dim();
    let mut result = Array3::zeros((nlags + 1, k, k));

    if p == 0 {
        result.slice_mut(s![0, .., ..]).assign(&sigma_u);
        return Ok(result);
    }

    let initial = lyapunov_acf(coefs, sigma_u)?;
    let n_initial = p.min(nlags + 1);
    result
        .slice_mut(s![..n_initial, .., ..])
        .assign(&initial.slice(s![..n_initial, .., ..]));

    for h in p..=nlags {
        let mut gamma = Array2::<f64>::zeros((k, k));
        for j in 0..p {
            gamma += &coefs
                .slice(s![j, .., ..])
                .dot(&result.slice(s![h - j - 1, .., ..]));
        }
        result.slice_mut(s![h, .., ..]).assign(&gamma);
    }

    Ok(result)
}

/// `Gamma(0), ..., Gamma(p - 1)` from the vectorised Lyapunov equation.
fn lyapunov_acf(
    coefs: ArrayView3<'_, f64>,
    sigma_u: ArrayView2<'_, f64>,
) -> Result<Array3<f64>, ProcessError> {
    let (p, k, _) = coefs.dim();
    let n = k * p;

    let a = companion_matrix(coefs);
    let mut big_sigma = DMatrix::zeros(n, n);
    for i in 0..k {
        for j in 0..k {
            big_sigma[(i, j)] = sigma_u[[i, j]];
        }
    }

    let lhs = DMatrix::identity(n * n, n * n) - a.kronecker(&a);
    let rhs = linalg::vec(&big_sigma);
    let rhs = DMatrix::from_column_slice(n * n, 1, rhs.as_slice());
    let solved = linalg::solve(lhs, &rhs, "Lyapunov system (I - A ⊗ A)")?;
    let stacked = linalg::unvec(&solved.column(0).into_owned(), n);

    Ok(Array3::from_shape_fn((p, k, k), |(h, i, j)| {
        stacked[(i, h * k + j)]
    }))
}

/// Converts autocovariances to autocorrelations:
/// `rho(h)_ij = Gamma(h)_ij / sqrt(Gamma(0)_ii Gamma(0)_jj)`.
pub fn acf_to_acorr(acf: &Array3<f64>) -> Array3<f64> {
    let (_, k, _) = acf.dim();
    let sd: Vec<f64> = (0..k).map(|i| acf[[0, i, i]].sqrt()).collect();
    Array3::from_shape_fn(acf.dim(), |(h, i, j)| acf[[h, i, j]] / (sd[i] * sd[j]))
}
