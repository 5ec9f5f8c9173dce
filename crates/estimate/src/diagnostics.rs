//! Asymptotic covariances of the sample mean and of the noise covariance.

use ndarray::Array2;
use vecar_process::linalg;

use crate::error::EstimateError;
use crate::results::VarResults;

impl VarResults {
    /// Asymptotic covariance of the sample mean,
    /// `(I - A_1 - ... - A_p)^{-1} Sigma_u (I - A_1 - ... - A_p)^{-T}`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::Process`] when the characteristic matrix is
    /// singular.
    pub fn cov_ybar(&self) -> Result<Array2<f64>, EstimateError> {
        let a_inv = self.long_run_effects()?;
        Ok(a_inv.dot(self.sigma_u()).dot(&a_inv.t()))
    }

    /// Asymptotic covariance of `vech(Sigma_u)`,
    /// `2 D+ (Sigma_u ⊗ Sigma_u) D+'` with `D+` the Moore-Penrose inverse
    /// of the duplication matrix.
    ///
    /// # Errors
    ///
    /// Never fails for `k >= 1`; the `Result` covers the inversion of
    /// `D'D`.
    pub fn cov_sigma(&self) -> Result<Array2<f64>, EstimateError> {
        let d = linalg::duplication_matrix(self.k());
        let dtd = d.transpose() * &d;
        let d_plus = linalg::inverse(dtd, "D'D")? * d.transpose();
        let sigma = linalg::to_dmatrix(self.sigma_u().view());
        let sigxsig = sigma.kronecker(&sigma);
        let cov = (&d_plus * sigxsig * d_plus.transpose()) * 2.0;
        Ok(linalg::from_dmatrix(&cov))
    }

    /// Portmanteau test for residual autocorrelation.
    ///
    /// # Errors
    ///
    /// Always returns [`EstimateError::Unsupported`].
    pub fn test_whiteness(&self) -> Result<(), EstimateError> {
        Err(EstimateError::Unsupported {
            operation: "test_whiteness",
        })
    }

    /// Jarque-Bera type test for residual normality.
    ///
    /// # Errors
    ///
    /// Always returns [`EstimateError::Unsupported`].
    pub fn test_normality(&self) -> Result<(), EstimateError> {
        Err(EstimateError::Unsupported {
            operation: "test_normality",
        })
    }
}
