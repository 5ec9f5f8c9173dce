//! MA(∞) representation of a VAR(p) process.
//!
//! A stable VAR(p) can be written as `y[t] = mu + sum_i Phi_i u[t-i]` with
//!
//! ```text
//! Phi_0 = I
//! Phi_i = sum_{j=1}^{min(i, p)} Phi_{i-j} A_j
//! ```

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, s};

/// Computes `Phi_0, ..., Phi_maxn` as a `(maxn + 1, k, k)` array.
///
/// The recursion costs `O(maxn * p * k^3)`.
pub fn ma_rep(coefs: ArrayView3<'_, f64>, maxn: usize) -> Array3<f64> {
    let (p, k, _) = coefs.dim();
    let mut phis = Array3::zeros((maxn + 1, k, k));
    phis.slice_mut(s![0, .., ..]).assign(&Array2::<f64>::eye(k));

    for i in 1..=maxn {
        let mut phi = Array2::<f64>::zeros((k, k));
        for j in 1..=i.min(p) {
            phi += &phis
                .slice(s![i - j, .., ..])
                .dot(&coefs.slice(s![j - 1, .., ..]));
        }
        phis.slice_mut(s![i, .., ..]).assign(&phi);
    }

    phis
}

/// Orthogonalised MA coefficients `Phi_i P` for a factor `P` with
/// `Sigma_u = P P'`.
pub fn orth_ma_rep(coefs: ArrayView3<'_, f64>, maxn: usize, p: ArrayView2<'_, f64>) -> Array3<f64> {
    let mut phis = ma_rep(coefs, maxn);
    for mut phi in phis.outer_iter_mut() {
        let rotated = phi.dot(&p);
        phi.assign(&rotated);
    }
    phis
}
