//! Forecast error variance decomposition.

use ndarray::{Array2, Array3, ArrayView2, s};
use tracing::info;
use vecar_process::{ProcessError, VarProcess, Variable};

use crate::config::FevdConfig;
use crate::error::FevdError;

/// Shares of the `h`-step forecast-error variance of each equation that are
/// attributable to each orthogonalised shock.
///
/// With `Psi_i = Phi_i P` the orthogonalised MA coefficients,
///
/// ```text
/// decomp[j, h-1, s] = sum_{i<h} Psi_i[j, s]^2 / Sigma_y(h)[j, j]
/// ```
///
/// When `P P' = Sigma_u` every `(equation, horizon)` row sums to one. A
/// factor that does not reproduce `Sigma_u` is used as given and the rows
/// are not renormalised.
#[derive(Debug, Clone, PartialEq)]
pub struct Fevd {
    /// `(equation, horizon, shock)`.
    decomp: Array3<f64>,
    names: Vec<String>,
}

impl Fevd {
    /// Decomposes the forecast-error variance of `process` over horizons
    /// `1..=config.periods()`.
    ///
    /// Fitted models can be passed directly since `VarResults` dereferences
    /// to [`VarProcess`].
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FevdError::InvalidPeriods`] | `periods == 0` |
    /// | [`FevdError::NonSquareDecomposition`] | the supplied factor is not square |
    /// | [`FevdError::Process`] | the factor is not `k x k`, or `Sigma_u` has no Cholesky factor |
    /// | [`FevdError::DegenerateVariance`] | a forecast-error variance is zero |
    #[tracing::instrument(skip_all, fields(periods = config.periods(), k = process.k()))]
    pub fn new(process: &VarProcess, config: &FevdConfig) -> Result<Self, FevdError> {
        config.validate()?;
        let periods = config.periods();
        let k = process.k();

        let orth = process.orth_ma_rep(periods - 1, config.decomposition().map(|p| p.view()))?;
        let mse = process.mse(periods);

        let mut decomp = Array3::zeros((k, periods, k));
        let mut cumulative = Array2::<f64>::zeros((k, k));
        for h in 0..periods {
            cumulative += &orth.slice(s![h, .., ..]).mapv(|v| v * v);
            for j in 0..k {
                let variance = mse[[h, j, j]];
                if variance.is_nan() || variance <= 0.0 {
                    return Err(FevdError::DegenerateVariance {
                        equation: j,
                        horizon: h + 1,
                    });
                }
                let shares = cumulative.row(j).mapv(|v| v / variance);
                decomp.slice_mut(s![j, h, ..]).assign(&shares);
            }
        }

        info!("variance decomposition computed");
        Ok(Self {
            decomp,
            names: process.names().to_vec(),
        })
    }

    /// Returns the `(equation, horizon, shock)` share table.
    pub fn decomp(&self) -> &Array3<f64> {
        &self.decomp
    }

    /// Number of horizons.
    pub fn periods(&self) -> usize {
        self.decomp.dim().1
    }

    /// Number of variables.
    pub fn k(&self) -> usize {
        self.decomp.dim().0
    }

    /// Variable names, shared by equations and shocks.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(horizon, shock)` shares of one equation.
    ///
    /// # Errors
    ///
    /// [`FevdError::Process`] when the variable cannot be resolved.
    pub fn equation<'a>(&self, var: impl Into<Variable<'a>>) -> Result<ArrayView2<'_, f64>, FevdError> {
        let index = match var.into() {
            Variable::Name(name) => self
                .names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| ProcessError::UnknownVariable {
                    name: name.to_string(),
                    known: self.names.clone(),
                })?,
            Variable::Index(index) if index < self.k() => index,
            Variable::Index(index) => {
                return Err(ProcessError::VariableIndexOutOfRange { index, k: self.k() }.into());
            }
        };
        Ok(self.decomp.slice(s![index, .., ..]))
    }

    /// Asymptotic standard errors of the shares.
    ///
    /// # Errors
    ///
    /// Always returns [`FevdError::Unsupported`].
    pub fn cov(&self) -> Result<Array3<f64>, FevdError> {
        Err(FevdError::Unsupported {
            operation: "Fevd::cov",
        })
    }
}
