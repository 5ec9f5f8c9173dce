//! Companion (VAR(1)) form and the stability test.
//!
//! A VAR(p) process
//!
//! ```text
//! y[t] = A_1 y[t-1] + ... + A_p y[t-p] + u[t]
//! ```
//!
//! is rewritten as `Y[t] = A Y[t-1] + U[t]` with the stacked state
//! `Y[t] = (y[t], ..., y[t-p+1])` and the `kp x kp` companion matrix
//!
//! ```text
//!     | A_1  A_2  ...  A_{p-1}  A_p |
//!     | I    0    ...  0        0   |
//! A = | 0    I    ...  0        0   |
//!     | ...                         |
//!     | 0    0    ...  I        0   |
//! ```

use nalgebra::DMatrix;
use ndarray::ArrayView3;
use tracing::debug;

/// Builds the `kp x kp` companion matrix of a `(p, k, k)` coefficient tensor.
///
/// Returns a `0 x 0` matrix when `p == 0`.
pub fn companion_matrix(coefs: ArrayView3<'_, f64>) -> DMatrix<f64> {
    let (p, k, _) = coefs.dim();
    let n = k * p;
    let mut a = DMatrix::zeros(n, n);

    // Top block row: A_1 ... A_p side by side.
    for lag in 0..p {
        for i in 0..k {
            for j in 0..k {
                a[(i, lag * k + j)] = coefs[[lag, i, j]];
            }
        }
    }

    // Shifted identity below the top block row.
    for i in k..n {
        a[(i, i - k)] = 1.0;
    }

    a
}

/// Moduli of the companion-matrix eigenvalues, in the order returned by the
/// Schur decomposition.
pub fn eigenvalue_moduli(coefs: ArrayView3<'_, f64>) -> Vec<f64> {
    let a = companion_matrix(coefs);
    match a.nrows() {
        0 => Vec::new(),
        1 => vec![a[(0, 0)].abs()],
        _ => a.complex_eigenvalues().iter().map(|z| z.norm()).collect(),
    }
}

/// Relative slack on the unit circle per companion dimension, absorbing
/// rounding in the Schur decomposition.
const UNIT_CIRCLE_TOL: f64 = 1e-10;

/// Returns `true` when every companion eigenvalue has modulus `<= 1`.
///
/// The bound is inclusive, so a process with a unit root is reported as
/// stable even though its autocovariances do not exist. Moduli within
/// `1e-10 * kp` of one count as on the circle.
pub fn is_stable(coefs: ArrayView3<'_, f64>) -> bool {
    let moduli = eigenvalue_moduli(coefs);
    debug!(?moduli, "companion eigenvalue moduli");
    let bound = 1.0 + UNIT_CIRCLE_TOL * moduli.len().max(1) as f64;
    moduli.iter().all(|&m| m <= bound)
}
