//! Information criteria for lag-order selection.

use std::fmt;
use std::str::FromStr;

use crate::error::EstimateError;

/// One of the four supported information criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoCriterion {
    /// Akaike information criterion.
    Aic,
    /// Bayesian (Schwarz) information criterion.
    Bic,
    /// Hannan-Quinn information criterion.
    Hqic,
    /// Final prediction error.
    Fpe,
}

impl InfoCriterion {
    /// All criteria in reporting order.
    pub const ALL: [InfoCriterion; 4] = [
        InfoCriterion::Aic,
        InfoCriterion::Bic,
        InfoCriterion::Hqic,
        InfoCriterion::Fpe,
    ];

    /// Lower-case name used in `FromStr` and `Display`.
    pub fn name(self) -> &'static str {
        match self {
            InfoCriterion::Aic => "aic",
            InfoCriterion::Bic => "bic",
            InfoCriterion::Hqic => "hqic",
            InfoCriterion::Fpe => "fpe",
        }
    }
}

impl fmt::Display for InfoCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InfoCriterion {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aic" => Ok(InfoCriterion::Aic),
            "bic" => Ok(InfoCriterion::Bic),
            "hqic" => Ok(InfoCriterion::Hqic),
            "fpe" => Ok(InfoCriterion::Fpe),
            _ => Err(EstimateError::UnknownCriterion {
                value: s.to_string(),
            }),
        }
    }
}

/// Values of all four criteria for one fitted model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfoCriteria {
    /// Akaike.
    pub aic: f64,
    /// Schwarz.
    pub bic: f64,
    /// Hannan-Quinn.
    pub hqic: f64,
    /// Final prediction error.
    pub fpe: f64,
}

impl InfoCriteria {
    /// Computes the criteria from `ld = ln|Sigma_u_mle|`.
    ///
    /// `nobs` is the effective sample size, `k` the number of equations,
    /// `df_model` the regressors per equation and `free_params` the number of
    /// estimated coefficients (`p k^2 + k * trend`).
    pub fn compute(
        ld: f64,
        nobs: usize,
        k: usize,
        df_model: usize,
        df_resid: usize,
        free_params: usize,
    ) -> Self {
        let t = nobs as f64;
        let free = free_params as f64;
        let fpe_base = (t + df_model as f64) / df_resid as f64;
        Self {
            aic: ld + 2.0 * free / t,
            bic: ld + t.ln() * free / t,
            hqic: ld + 2.0 * t.ln().ln() * free / t,
            fpe: fpe_base.powi(k as i32) * ld.exp(),
        }
    }

    /// Returns the value of one criterion.
    pub fn get(&self, criterion: InfoCriterion) -> f64 {
        match criterion {
            InfoCriterion::Aic => self.aic,
            InfoCriterion::Bic => self.bic,
            InfoCriterion::Hqic => self.hqic,
            InfoCriterion::Fpe => self.fpe,
        }
    }

    /// All criteria set to `+inf`, used for candidate orders that failed.
    pub(crate) fn infinite() -> Self {
        Self {
            aic: f64::INFINITY,
            bic: f64::INFINITY,
            hqic: f64::INFINITY,
            fpe: f64::INFINITY,
        }
    }
}
