//! Error types for the vecar-estimate crate.

use vecar_process::ProcessError;

/// Error type for all fallible operations in the vecar-estimate crate.
///
/// Covers invalid arguments (unknown tags, out-of-range levels), models with
/// too few observations for the requested order, and numerical failures
/// raised by the underlying process representation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimateError {
    /// Process or linear-algebra error.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Returned when the residual degrees of freedom are not positive.
    #[error(
        "not enough observations: {nobs} usable rows for {params} parameters per equation \
         (lag order {lags})"
    )]
    InsufficientObservations {
        /// Rows left after dropping the presample.
        nobs: usize,
        /// Regressors per equation (`k * p + trend order`).
        params: usize,
        /// Requested lag order.
        lags: usize,
    },

    /// Returned when the lag order leaves no rows at all.
    #[error("lag order {lags} needs more than {nobs} observations")]
    LagOrderTooLarge {
        /// Requested lag order.
        lags: usize,
        /// Observations in the series.
        nobs: usize,
    },

    /// Returned when a trend tag is not recognised.
    #[error("unknown trend '{value}', expected one of nc, c, ct, ctt")]
    UnknownTrend {
        /// The unrecognised tag.
        value: String,
    },

    /// Returned when an information-criterion name is not recognised.
    #[error("unknown information criterion '{value}', expected one of aic, bic, hqic, fpe")]
    UnknownCriterion {
        /// The unrecognised name.
        value: String,
    },

    /// Returned when a causality test kind is not recognised.
    #[error("unknown causality test kind '{value}', expected one of f, wald")]
    UnknownTestKind {
        /// The unrecognised kind.
        value: String,
    },

    /// Returned when a significance level is outside (0, 1).
    #[error("significance level must lie in (0, 1), got {signif}")]
    InvalidSignificance {
        /// The invalid level.
        signif: f64,
    },

    /// Returned when a causality test restricts no coefficients.
    #[error("causality test restricts no coefficients ({variables} variables, lag order {lags})")]
    EmptyRestriction {
        /// Number of causing variables supplied.
        variables: usize,
        /// Lag order of the fitted model.
        lags: usize,
    },

    /// Returned when every candidate order in a selection sweep fails.
    #[error("no lag order in 0..={max_lags} could be estimated")]
    NoCandidateOrder {
        /// Largest candidate order.
        max_lags: usize,
    },

    /// Returned when a configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: &'static str,
    },

    /// Returned for diagnostics that are deliberately not provided.
    #[error("{operation} is not supported")]
    Unsupported {
        /// Name of the unsupported operation.
        operation: &'static str,
    },

    /// Returned when a reference distribution cannot be constructed.
    #[error("distribution construction failed: {message}")]
    Distribution {
        /// Description of the failure.
        message: String,
    },
}
