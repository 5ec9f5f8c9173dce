//! Dense linear-algebra bridge between `ndarray` and `nalgebra`.
//!
//! Public containers in this workspace are `ndarray` arrays; decompositions
//! (LU, Cholesky, SVD, Schur) come from `nalgebra`. The helpers here copy
//! between the two and wrap the fallible solves in [`ProcessError`].
//!
//! `nalgebra` stores matrices column-major, so [`vec`] is a plain copy of the
//! storage.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array2, ArrayView2};

use crate::error::ProcessError;

/// Copies an `ndarray` matrix into a `nalgebra::DMatrix`.
pub fn to_dmatrix(a: ArrayView2<'_, f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copies a `nalgebra::DMatrix` into an `ndarray` matrix.
pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Solves `a * x = b` by LU decomposition.
///
/// # Errors
///
/// [`ProcessError::SingularMatrix`] when the LU factor has a zero pivot or
/// the solution is not finite.
pub fn solve(
    a: DMatrix<f64>,
    b: &DMatrix<f64>,
    context: &'static str,
) -> Result<DMatrix<f64>, ProcessError> {
    let x = a
        .lu()
        .solve(b)
        .ok_or(ProcessError::SingularMatrix { context })?;
    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(ProcessError::SingularMatrix { context })
    }
}

/// Inverts a square matrix.
///
/// # Errors
///
/// [`ProcessError::SingularMatrix`] when the matrix is not invertible.
pub fn inverse(a: DMatrix<f64>, context: &'static str) -> Result<DMatrix<f64>, ProcessError> {
    let inv = a
        .try_inverse()
        .ok_or(ProcessError::SingularMatrix { context })?;
    if inv.iter().all(|v| v.is_finite()) {
        Ok(inv)
    } else {
        Err(ProcessError::SingularMatrix { context })
    }
}

/// Lower-triangular Cholesky factor `L` with `a = L Lᵀ`.
///
/// # Errors
///
/// [`ProcessError::NotPositiveDefinite`] when the factorisation fails.
pub fn cholesky_lower(
    a: DMatrix<f64>,
    context: &'static str,
) -> Result<DMatrix<f64>, ProcessError> {
    let l = a
        .cholesky()
        .map(|c| c.l())
        .ok_or(ProcessError::NotPositiveDefinite { context })?;
    // nalgebra accepts a zero pivot; a factor of a PD matrix has none
    if l.diagonal().iter().all(|d| d.is_finite() && *d > 0.0) {
        Ok(l)
    } else {
        Err(ProcessError::NotPositiveDefinite { context })
    }
}

/// Natural log of the determinant of a symmetric positive-definite matrix.
///
/// # Errors
///
/// [`ProcessError::NotPositiveDefinite`] when the matrix is singular or
/// indefinite.
pub fn logdet(a: DMatrix<f64>, context: &'static str) -> Result<f64, ProcessError> {
    let l = cholesky_lower(a, context)?;
    Ok(2.0 * l.diagonal().iter().map(|d| d.ln()).sum::<f64>())
}

/// Minimum-norm least-squares solution of `z * b = y` via SVD.
///
/// Singular values below `eps * max(rows, cols) * s_max` are treated as zero,
/// so rank-deficient designs still produce a solution.
///
/// # Errors
///
/// [`ProcessError::SingularMatrix`] when the SVD solve fails.
pub fn lstsq(z: DMatrix<f64>, y: &DMatrix<f64>) -> Result<DMatrix<f64>, ProcessError> {
    let context = "least-squares design";
    if z.ncols() == 0 {
        return Ok(DMatrix::zeros(0, y.ncols()));
    }
    let scale = z.nrows().max(z.ncols()) as f64;
    let svd = z.svd(true, true);
    let s_max = svd.singular_values.max();
    let eps = f64::EPSILON * scale * s_max;
    let b = svd
        .solve(y, eps)
        .map_err(|_| ProcessError::SingularMatrix { context })?;
    if b.iter().all(|v| v.is_finite()) {
        Ok(b)
    } else {
        Err(ProcessError::SingularMatrix { context })
    }
}

/// Column-stacking vectorisation `vec(m)`.
pub fn vec(m: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_column_slice(m.as_slice())
}

/// Inverse of [`vec`] for an `n x n` matrix.
pub fn unvec(v: &DVector<f64>, n: usize) -> DMatrix<f64> {
    DMatrix::from_column_slice(n, n, v.as_slice())
}

/// Duplication matrix `D_k` with `vec(S) = D_k vech(S)` for symmetric `S`.
///
/// `vech` stacks the lower triangle column by column, giving `k(k+1)/2` rows.
pub fn duplication_matrix(k: usize) -> DMatrix<f64> {
    let mut d = DMatrix::zeros(k * k, k * (k + 1) / 2);
    let mut col = 0;
    for j in 0..k {
        for i in j..k {
            d[(j * k + i, col)] = 1.0;
            d[(i * k + j, col)] = 1.0;
            col += 1;
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn round_trip_ndarray() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let m = to_dmatrix(a.view());
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(from_dmatrix(&m), a);
    }

    #[test]
    fn solve_two_by_two() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DMatrix::from_row_slice(2, 1, &[3.0, 5.0]);
        let x = solve(a, &b, "test").unwrap();
        assert_abs_diff_eq!(x[(0, 0)], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(x[(1, 0)], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn solve_singular() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        assert!(matches!(
            solve(a, &b, "test"),
            Err(ProcessError::SingularMatrix { context: "test" })
        ));
    }

    #[test]
    fn inverse_singular() {
        let a = DMatrix::zeros(2, 2);
        assert!(matches!(
            inverse(a, "gram"),
            Err(ProcessError::SingularMatrix { context: "gram" })
        ));
    }

    #[test]
    fn cholesky_reconstructs() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 3.0]);
        let l = cholesky_lower(a.clone(), "test").unwrap();
        assert_eq!(l[(0, 1)], 0.0);
        let back = &l * l.transpose();
        for (x, y) in back.iter().zip(a.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert!(matches!(
            cholesky_lower(a, "test"),
            Err(ProcessError::NotPositiveDefinite { .. })
        ));
    }

    #[test]
    fn cholesky_rejects_zero() {
        let a = DMatrix::zeros(1, 1);
        assert!(matches!(
            cholesky_lower(a, "test"),
            Err(ProcessError::NotPositiveDefinite { .. })
        ));
    }

    #[test]
    fn logdet_diagonal() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 8.0]);
        assert_abs_diff_eq!(logdet(a, "test").unwrap(), 16.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn lstsq_exact_line() {
        // y = 2 + 3x on x = [0, 1, 2]
        let z = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DMatrix::from_row_slice(3, 1, &[2.0, 5.0, 8.0]);
        let b = lstsq(z, &y).unwrap();
        assert_abs_diff_eq!(b[(0, 0)], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(b[(1, 0)], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn lstsq_rank_deficient_is_finite() {
        // duplicated column: minimum-norm solution splits the weight
        let z = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let y = DMatrix::from_row_slice(3, 1, &[2.0, 4.0, 6.0]);
        let b = lstsq(z, &y).unwrap();
        assert_abs_diff_eq!(b[(0, 0)], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(b[(1, 0)], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn lstsq_empty_design() {
        let z = DMatrix::zeros(4, 0);
        let y = DMatrix::from_element(4, 2, 1.0);
        let b = lstsq(z, &y).unwrap();
        assert_eq!(b.shape(), (0, 2));
    }

    #[test]
    fn vec_is_column_major() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(vec(&m).as_slice(), &[1.0, 3.0, 2.0, 4.0]);
        assert_eq!(unvec(&vec(&m), 2), m);
    }

    #[test]
    fn duplication_matrix_maps_vech_to_vec() {
        let s = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0]);
        // vech: lower triangle, column by column
        let vech = DVector::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let d = duplication_matrix(3);
        assert_eq!(d.shape(), (9, 6));
        assert_eq!(&d * vech, vec(&s));
    }
}
