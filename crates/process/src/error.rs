//! Error types for the vecar-process crate.

/// Error type for all fallible operations in the vecar-process crate.
///
/// This enum covers malformed parameters and series, insufficient forecast
/// history, and numerical failures raised by the underlying dense solvers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProcessError {
    /// Returned when a series has no observations or no variables.
    #[error("series is empty: {nobs} observations of {k} variables")]
    EmptySeries {
        /// Number of observations.
        nobs: usize,
        /// Number of variables.
        k: usize,
    },

    /// Returned when an input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the offending input.
        input: &'static str,
    },

    /// Returned when the coefficient tensor holds non-square matrices.
    #[error("coefficient matrices must be square, got {rows}x{cols}")]
    NonSquareCoefficients {
        /// Rows of each coefficient matrix.
        rows: usize,
        /// Columns of each coefficient matrix.
        cols: usize,
    },

    /// Returned when an input does not match the system dimension `k`.
    #[error("{input} has dimension {got}, expected {expected}")]
    DimensionMismatch {
        /// Name of the offending input.
        input: &'static str,
        /// Expected dimension.
        expected: usize,
        /// Dimension that was supplied.
        got: usize,
    },

    /// Returned when the noise covariance is not symmetric.
    #[error("noise covariance is not symmetric (max asymmetry {asymmetry:e})")]
    NonSymmetricCovariance {
        /// Largest absolute difference between mirrored entries.
        asymmetry: f64,
    },

    /// Returned when the number of variable names does not match `k`.
    #[error("got {got} variable names for {k} variables")]
    NameCountMismatch {
        /// Number of names supplied.
        got: usize,
        /// Number of variables.
        k: usize,
    },

    /// Returned when a variable name appears more than once.
    #[error("duplicate variable name: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Returned when the number of dates does not match the observations.
    #[error("got {got} dates for {nobs} observations")]
    DateCountMismatch {
        /// Number of dates supplied.
        got: usize,
        /// Number of observations.
        nobs: usize,
    },

    /// Returned when a variable name cannot be resolved.
    #[error("unknown variable '{name}', expected one of {known:?}")]
    UnknownVariable {
        /// The name that was looked up.
        name: String,
        /// The known variable names.
        known: Vec<String>,
    },

    /// Returned when a variable index is out of range.
    #[error("variable index {index} out of range for {k} variables")]
    VariableIndexOutOfRange {
        /// The index that was looked up.
        index: usize,
        /// Number of variables.
        k: usize,
    },

    /// Returned when a forecast is requested with fewer than `p` prior rows.
    #[error("insufficient history: got {got} observations, need at least {need}")]
    InsufficientHistory {
        /// Number of rows supplied.
        got: usize,
        /// Lag order of the process.
        need: usize,
    },

    /// Returned when a forecast-interval significance level is outside (0, 1).
    #[error("alpha must lie in (0, 1), got {alpha}")]
    InvalidAlpha {
        /// The invalid level.
        alpha: f64,
    },

    /// Returned when a linear system or inverse is singular.
    #[error("singular matrix in {context}")]
    SingularMatrix {
        /// What was being solved.
        context: &'static str,
    },

    /// Returned when a Cholesky factorisation or log-determinant fails.
    #[error("matrix is not positive definite in {context}")]
    NotPositiveDefinite {
        /// What was being factorised.
        context: &'static str,
    },

    /// Returned when a reference distribution cannot be constructed.
    ///
    /// The `message` field is a `String` because statrs errors do not
    /// implement `Clone`.
    #[error("distribution construction failed: {message}")]
    Distribution {
        /// Description of the failure.
        message: String,
    },
}
