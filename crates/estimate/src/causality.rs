//! Wald and F tests of Granger non-causality.

use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};
use tracing::debug;
use vecar_process::{Variable, linalg};

use crate::error::EstimateError;
use crate::results::VarResults;

/// Reference distribution of the causality statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CausalityKind {
    /// `lambda / N` against `F(N, k * df_resid)`.
    #[default]
    F,
    /// `lambda` against `chi^2(N)`.
    Wald,
}

impl fmt::Display for CausalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CausalityKind::F => "f",
            CausalityKind::Wald => "wald",
        })
    }
}

impl FromStr for CausalityKind {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" => Ok(CausalityKind::F),
            "wald" => Ok(CausalityKind::Wald),
            _ => Err(EstimateError::UnknownTestKind {
                value: s.to_string(),
            }),
        }
    }
}

/// Outcome of a hypothesis test at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    /// The statistic exceeds the critical value.
    Reject,
    /// The statistic does not exceed the critical value.
    FailToReject,
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Conclusion::Reject => "reject",
            Conclusion::FailToReject => "fail to reject",
        })
    }
}

/// Result of [`VarResults::test_causality`].
#[derive(Debug, Clone, PartialEq)]
pub struct CausalityTest {
    kind: CausalityKind,
    statistic: f64,
    crit_value: f64,
    pvalue: f64,
    df: (usize, Option<usize>),
    signif: f64,
    conclusion: Conclusion,
}

impl CausalityTest {
    /// Returns the reference distribution.
    pub fn kind(&self) -> CausalityKind {
        self.kind
    }

    /// Returns the test statistic.
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Returns the `1 - signif` quantile of the reference distribution.
    pub fn crit_value(&self) -> f64 {
        self.crit_value
    }

    /// Returns the upper-tail probability of the statistic.
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// Returns the degrees of freedom: `(N, None)` for Wald,
    /// `(N, Some(k * df_resid))` for F.
    pub fn df(&self) -> (usize, Option<usize>) {
        self.df
    }

    /// Returns the significance level.
    pub fn signif(&self) -> f64 {
        self.signif
    }

    /// Returns the test decision.
    pub fn conclusion(&self) -> Conclusion {
        self.conclusion
    }
}

impl VarResults {
    /// Tests whether `causing` jointly Granger-cause `equation`.
    ///
    /// The null restricts every lag coefficient of each causing variable in
    /// the target equation to zero. With `N` restrictions `C vec(B') = 0`,
    ///
    /// ```text
    /// lambda = (C b)' (C cov_params C')^{-1} (C b)
    /// ```
    ///
    /// The null is rejected iff the statistic exceeds the critical value.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::InvalidSignificance`] | `signif` outside `(0, 1)` |
    /// | [`EstimateError::EmptyRestriction`] | no causing variables, or `p == 0` |
    /// | [`EstimateError::Process`] | unknown variable, or a singular restriction covariance |
    /// | [`EstimateError::Distribution`] | the reference distribution cannot be built |
    #[tracing::instrument(skip_all, fields(kind = %kind, signif = signif))]
    pub fn test_causality<'a, V>(
        &self,
        equation: impl Into<Variable<'a>>,
        causing: &[V],
        kind: CausalityKind,
        signif: f64,
    ) -> Result<CausalityTest, EstimateError>
    where
        V: Into<Variable<'a>> + Copy,
    {
        if !(signif > 0.0 && signif < 1.0) {
            return Err(EstimateError::InvalidSignificance { signif });
        }
        let (k, p) = (self.k(), self.p());
        let n = causing.len() * p;
        if n == 0 {
            return Err(EstimateError::EmptyRestriction {
                variables: causing.len(),
                lags: p,
            });
        }

        let eq = self.eq_index(equation)?;
        let vars = causing
            .iter()
            .map(|&v| self.eq_index(v))
            .collect::<Result<Vec<_>, _>>()?;

        // vec(B') stores regressor r of equation i at r * k + i
        let n_trend = self.trend().order();
        let offsets: Vec<usize> = (0..p)
            .flat_map(|j| vars.iter().map(move |&v| (n_trend + j * k + v) * k + eq))
            .collect();

        let params = self.params();
        let cb = DVector::from_iterator(n, offsets.iter().map(|&o| params[[o / k, o % k]]));
        let cov = self.cov_params()?;
        let middle = DMatrix::from_fn(n, n, |a, b| cov[[offsets[a], offsets[b]]]);
        let middle_inv = linalg::inverse(middle, "restricted parameter covariance")?;
        let lam_wald = (cb.transpose() * middle_inv * &cb)[(0, 0)];

        let (statistic, crit_value, pvalue, df) = match kind {
            CausalityKind::Wald => {
                let dist = ChiSquared::new(n as f64).map_err(|e| EstimateError::Distribution {
                    message: e.to_string(),
                })?;
                (
                    lam_wald,
                    dist.inverse_cdf(1.0 - signif),
                    dist.sf(lam_wald),
                    (n, None),
                )
            }
            CausalityKind::F => {
                let denom = k * self.df_resid();
                let dist = FisherSnedecor::new(n as f64, denom as f64).map_err(|e| {
                    EstimateError::Distribution {
                        message: e.to_string(),
                    }
                })?;
                let statistic = lam_wald / n as f64;
                (
                    statistic,
                    dist.inverse_cdf(1.0 - signif),
                    dist.sf(statistic),
                    (n, Some(denom)),
                )
            }
        };

        let conclusion = if statistic > crit_value {
            Conclusion::Reject
        } else {
            Conclusion::FailToReject
        };
        debug!(statistic, crit_value, pvalue, %conclusion, "causality test");

        Ok(CausalityTest {
            kind,
            statistic,
            crit_value,
            pvalue,
            df,
            signif,
            conclusion,
        })
    }
}
