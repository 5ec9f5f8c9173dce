//! A VAR(p) process with known parameters.

use std::sync::OnceLock;

use ndarray::{Array1, Array2, Array3, ArrayView2, ArrayView3, Axis, s};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::acf::{acf_to_acorr, var_acf};
use crate::error::ProcessError;
use crate::forecast::{ForecastBundle, forecast, forecast_cov, interval_from_covs};
use crate::linalg;
use crate::ma::{ma_rep, orth_ma_rep};
use crate::series::{default_names, validate_names};
use crate::stability::is_stable;

/// Burn-in discarded at the start of every simulated path.
const BURN_IN: usize = 100;

/// Reference to a variable, either by name or by column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variable<'a> {
    /// Variable name as given at construction.
    Name(&'a str),
    /// Zero-based column index.
    Index(usize),
}

impl<'a> From<&'a str> for Variable<'a> {
    fn from(name: &'a str) -> Self {
        Variable::Name(name)
    }
}

impl<'a> From<&'a String> for Variable<'a> {
    fn from(name: &'a String) -> Self {
        Variable::Name(name.as_str())
    }
}

impl From<usize> for Variable<'_> {
    fn from(index: usize) -> Self {
        Variable::Index(index)
    }
}

/// A VAR(p) process
///
/// ```text
/// y[t] = nu + A_1 y[t-1] + ... + A_p y[t-p] + u[t],   u[t] ~ (0, Sigma_u)
/// ```
///
/// The parameters never change after construction; the Cholesky factor of
/// `Sigma_u` and the characteristic matrix `I - A_1 - ... - A_p` are computed
/// on first use and cached.
///
/// # Example
///
/// ```
/// use ndarray::{Array3, array};
/// use vecar_process::VarProcess;
///
/// let coefs = Array3::from_elem((1, 1, 1), 0.5);
/// let process = VarProcess::new(coefs, array![0.0], array![[1.0]]).unwrap();
/// assert!(process.is_stable());
///
/// let f = process.forecast(array![[2.0]].view(), 3).unwrap();
/// assert_eq!(f.column(0).to_vec(), vec![1.0, 0.5, 0.25]);
/// ```
#[derive(Clone, Debug)]
pub struct VarProcess {
    coefs: Array3<f64>,
    intercept: Array1<f64>,
    sigma_u: Array2<f64>,
    names: Vec<String>,
    chol_sigma_u: OnceLock<Result<Array2<f64>, ProcessError>>,
    char_mat: OnceLock<Array2<f64>>,
}

impl VarProcess {
    /// Creates a process from a `(p, k, k)` coefficient tensor, a length-`k`
    /// intercept and a `k x k` noise covariance.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::NonSquareCoefficients`] | coefficient matrices are not square |
    /// | [`ProcessError::DimensionMismatch`] | intercept or `Sigma_u` does not match `k` |
    /// | [`ProcessError::NonFiniteInput`] | any parameter is NaN or infinite |
    /// | [`ProcessError::NonSymmetricCovariance`] | `Sigma_u` is not symmetric |
    pub fn new(
        coefs: Array3<f64>,
        intercept: Array1<f64>,
        sigma_u: Array2<f64>,
    ) -> Result<Self, ProcessError> {
        let (_, rows, cols) = coefs.dim();
        if rows != cols {
            return Err(ProcessError::NonSquareCoefficients { rows, cols });
        }
        let k = rows;
        if intercept.len() != k {
            return Err(ProcessError::DimensionMismatch {
                input: "intercept",
                expected: k,
                got: intercept.len(),
            });
        }
        if sigma_u.nrows() != k || sigma_u.ncols() != k {
            return Err(ProcessError::DimensionMismatch {
                input: "sigma_u",
                expected: k,
                got: if sigma_u.nrows() != k {
                    sigma_u.nrows()
                } else {
                    sigma_u.ncols()
                },
            });
        }
        if !coefs.iter().all(|v| v.is_finite()) {
            return Err(ProcessError::NonFiniteInput { input: "coefs" });
        }
        if !intercept.iter().all(|v| v.is_finite()) {
            return Err(ProcessError::NonFiniteInput { input: "intercept" });
        }
        if !sigma_u.iter().all(|v| v.is_finite()) {
            return Err(ProcessError::NonFiniteInput { input: "sigma_u" });
        }
        check_symmetric(sigma_u.view())?;

        Ok(Self {
            coefs,
            intercept,
            sigma_u,
            names: default_names(k),
            chol_sigma_u: OnceLock::new(),
            char_mat: OnceLock::new(),
        })
    }

    /// Replaces the default `y1..yk` variable names.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::NameCountMismatch`] | number of names differs from `k` |
    /// | [`ProcessError::DuplicateName`] | a name appears twice |
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = validate_names(names, self.k())?;
        Ok(self)
    }

    /// Returns the lag order `p`.
    pub fn p(&self) -> usize {
        self.coefs.len_of(Axis(0))
    }

    /// Returns the number of variables (equations) `k`.
    pub fn k(&self) -> usize {
        self.intercept.len()
    }

    /// Returns the `(p, k, k)` coefficient tensor; `coefs[i]` is `A_{i+1}`.
    pub fn coefs(&self) -> ArrayView3<'_, f64> {
        self.coefs.view()
    }

    /// Returns the intercept `nu`.
    pub fn intercept(&self) -> &Array1<f64> {
        &self.intercept
    }

    /// Returns the noise covariance `Sigma_u`.
    pub fn sigma_u(&self) -> &Array2<f64> {
        &self.sigma_u
    }

    /// Returns the variable names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a variable reference to its column index.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::UnknownVariable`] | no variable has this name |
    /// | [`ProcessError::VariableIndexOutOfRange`] | index `>= k` |
    pub fn eq_index<'a>(&self, var: impl Into<Variable<'a>>) -> Result<usize, ProcessError> {
        match var.into() {
            Variable::Name(name) => self.names.iter().position(|n| n == name).ok_or_else(|| {
                ProcessError::UnknownVariable {
                    name: name.to_string(),
                    known: self.names.clone(),
                }
            }),
            Variable::Index(index) if index < self.k() => Ok(index),
            Variable::Index(index) => Err(ProcessError::VariableIndexOutOfRange {
                index,
                k: self.k(),
            }),
        }
    }

    /// Returns `true` when every companion eigenvalue has modulus `<= 1`.
    pub fn is_stable(&self) -> bool {
        is_stable(self.coefs.view())
    }

    /// Characteristic matrix `I - A_1 - ... - A_p`.
    pub fn char_mat(&self) -> &Array2<f64> {
        self.char_mat.get_or_init(|| {
            Array2::<f64>::eye(self.k()) - self.coefs.sum_axis(Axis(0))
        })
    }

    /// Lower Cholesky factor `P` of `Sigma_u = P P'`.
    ///
    /// # Errors
    ///
    /// [`ProcessError::NotPositiveDefinite`] when `Sigma_u` is singular or
    /// indefinite.
    pub fn chol_sigma_u(&self) -> Result<&Array2<f64>, ProcessError> {
        self.chol_sigma_u
            .get_or_init(|| {
                linalg::cholesky_lower(linalg::to_dmatrix(self.sigma_u.view()), "sigma_u")
                    .map(|l| linalg::from_dmatrix(&l))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Process mean `mu = (I - A_1 - ... - A_p)^{-1} nu`.
    ///
    /// # Errors
    ///
    /// [`ProcessError::SingularMatrix`] when the characteristic matrix is
    /// singular, typically because of a unit root.
    pub fn mean(&self) -> Result<Array1<f64>, ProcessError> {
        let a = linalg::to_dmatrix(self.char_mat().view());
        let b = nalgebra::DMatrix::from_iterator(self.k(), 1, self.intercept.iter().copied());
        let mu = linalg::solve(a, &b, "characteristic matrix I - A_1 - ... - A_p")?;
        Ok(Array1::from_iter(mu.iter().copied()))
    }

    /// Long-run effects `(I - A_1 - ... - A_p)^{-1}`, the total response to a
    /// permanent unit shock.
    ///
    /// # Errors
    ///
    /// [`ProcessError::SingularMatrix`] when the characteristic matrix is
    /// singular.
    pub fn long_run_effects(&self) -> Result<Array2<f64>, ProcessError> {
        let inv = linalg::inverse(
            linalg::to_dmatrix(self.char_mat().view()),
            "characteristic matrix I - A_1 - ... - A_p",
        )?;
        Ok(linalg::from_dmatrix(&inv))
    }

    /// MA(∞) coefficients `Phi_0, ..., Phi_maxn`.
    pub fn ma_rep(&self, maxn: usize) -> Array3<f64> {
        ma_rep(self.coefs.view(), maxn)
    }

    /// Orthogonalised MA coefficients `Phi_i P`.
    ///
    /// `decomposition` must satisfy `Sigma_u = P P'`; it defaults to the
    /// lower Cholesky factor of `Sigma_u`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::DimensionMismatch`] | `P` is not `k x k` |
    /// | [`ProcessError::NotPositiveDefinite`] | default factor requested for a singular `Sigma_u` |
    pub fn orth_ma_rep(
        &self,
        maxn: usize,
        decomposition: Option<ArrayView2<'_, f64>>,
    ) -> Result<Array3<f64>, ProcessError> {
        let p = match decomposition {
            Some(p) => {
                if p.dim() != (self.k(), self.k()) {
                    return Err(ProcessError::DimensionMismatch {
                        input: "decomposition",
                        expected: self.k(),
                        got: if p.nrows() != self.k() {
                            p.nrows()
                        } else {
                            p.ncols()
                        },
                    });
                }
                p.reborrow()
            }
            None => self.chol_sigma_u()?.view(),
        };
        Ok(orth_ma_rep(self.coefs.view(), maxn, p))
    }

    /// Autocovariances `Gamma(0), ..., Gamma(nlags)`; `nlags` defaults to `p`.
    ///
    /// The process must be strictly stable. A unit root passes
    /// [`VarProcess::is_stable`] but makes this solve fail.
    ///
    /// # Errors
    ///
    /// [`ProcessError::SingularMatrix`] when the Lyapunov system is singular.
    pub fn acf(&self, nlags: Option<usize>) -> Result<Array3<f64>, ProcessError> {
        var_acf(
            self.coefs.view(),
            self.sigma_u.view(),
            nlags.unwrap_or(self.p()),
        )
    }

    /// Autocorrelations derived from [`VarProcess::acf`].
    ///
    /// # Errors
    ///
    /// [`ProcessError::SingularMatrix`] when the Lyapunov system is singular.
    pub fn acorr(&self, nlags: Option<usize>) -> Result<Array3<f64>, ProcessError> {
        Ok(acf_to_acorr(&self.acf(nlags)?))
    }

    /// Minimum-MSE forecasts for `steps` periods from the last `p` rows of
    /// `y`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::DimensionMismatch`] | `y` does not have `k` columns |
    /// | [`ProcessError::InsufficientHistory`] | `y` has fewer than `p` rows |
    pub fn forecast(&self, y: ArrayView2<'_, f64>, steps: usize) -> Result<Array2<f64>, ProcessError> {
        forecast(y, self.coefs.view(), self.intercept.view(), steps)
    }

    /// Asymptotic forecast-error covariances `Sigma_y(1), ..., Sigma_y(steps)`
    /// without parameter-uncertainty correction.
    pub fn mse(&self, steps: usize) -> Array3<f64> {
        forecast_cov(self.ma_rep(steps).view(), self.sigma_u.view(), steps)
    }

    /// Gaussian forecast intervals with coverage `1 - alpha` based on
    /// [`VarProcess::mse`].
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::InvalidAlpha`] | `alpha` outside `(0, 1)` |
    /// | [`ProcessError::InsufficientHistory`] | `y` has fewer than `p` rows |
    pub fn forecast_interval(
        &self,
        y: ArrayView2<'_, f64>,
        steps: usize,
        alpha: f64,
    ) -> Result<ForecastBundle, ProcessError> {
        let point = self.forecast(y, steps)?;
        interval_from_covs(point, self.mse(steps).view(), alpha)
    }

    /// Simulates a `steps x k` path driven by Gaussian innovations with
    /// covariance `Sigma_u`.
    ///
    /// The recursion starts from zero and discards a burn-in of 100 periods.
    ///
    /// # Errors
    ///
    /// [`ProcessError::NotPositiveDefinite`] when `Sigma_u` has no Cholesky
    /// factor.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        steps: usize,
        rng: &mut R,
    ) -> Result<Array2<f64>, ProcessError> {
        let k = self.k();
        let p = self.p();
        let chol = self.chol_sigma_u()?;
        let n_tot = BURN_IN + steps;
        let mut y = Array2::<f64>::zeros((n_tot, k));

        for t in 0..n_tot {
            let z: Array1<f64> = (0..k)
                .map(|_| Distribution::<f64>::sample(&StandardNormal, rng))
                .collect();
            let mut val = &self.intercept + &chol.dot(&z);
            for j in 0..p.min(t) {
                val += &self.coefs.slice(s![j, .., ..]).dot(&y.row(t - 1 - j));
            }
            y.row_mut(t).assign(&val);
        }

        Ok(y.slice(s![BURN_IN.., ..]).to_owned())
    }
}

/// Rejects covariance matrices that are not symmetric up to rounding.
fn check_symmetric(sigma: ArrayView2<'_, f64>) -> Result<(), ProcessError> {
    let scale = sigma.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let asymmetry = (&sigma - &sigma.t()).iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if asymmetry > 1e-8 * scale.max(1.0) {
        return Err(ProcessError::NonSymmetricCovariance { asymmetry });
    }
    Ok(())
}
