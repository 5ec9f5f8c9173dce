//! Error types for the vecar-fevd crate.

use vecar_process::ProcessError;

/// Error type for all fallible operations in the vecar-fevd crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FevdError {
    /// Process or linear-algebra error.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Returned when the decomposition horizon is zero.
    #[error("periods must be at least 1, got {periods}")]
    InvalidPeriods {
        /// The invalid horizon.
        periods: usize,
    },

    /// Returned when a supplied decomposition factor is not square.
    #[error("decomposition factor must be square, got {rows}x{cols}")]
    NonSquareDecomposition {
        /// Rows of the factor.
        rows: usize,
        /// Columns of the factor.
        cols: usize,
    },

    /// Returned when a supplied decomposition factor contains NaN or infinity.
    #[error("decomposition factor contains non-finite values")]
    NonFiniteDecomposition,

    /// Returned when a forecast-error variance is zero, so shares are
    /// undefined.
    #[error("forecast-error variance of equation {equation} is zero at horizon {horizon}")]
    DegenerateVariance {
        /// Equation index.
        equation: usize,
        /// Horizon, counted from 1.
        horizon: usize,
    },

    /// Returned by operations that are declared but not implemented.
    #[error("{operation} is not supported")]
    Unsupported {
        /// Name of the operation.
        operation: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = FevdError::InvalidPeriods { periods: 0 };
        assert_eq!(e.to_string(), "periods must be at least 1, got 0");

        let e = FevdError::NonSquareDecomposition { rows: 2, cols: 3 };
        assert_eq!(e.to_string(), "decomposition factor must be square, got 2x3");

        let e = FevdError::DegenerateVariance {
            equation: 1,
            horizon: 4,
        };
        assert_eq!(
            e.to_string(),
            "forecast-error variance of equation 1 is zero at horizon 4"
        );

        let e = FevdError::Unsupported {
            operation: "Fevd::cov",
        };
        assert_eq!(e.to_string(), "Fevd::cov is not supported");
    }

    #[test]
    fn test_process_error_is_transparent() {
        let inner = ProcessError::SingularMatrix { context: "test" };
        let e = FevdError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
    }

    #[test]
    fn test_error_is_std_error() {
        let e = FevdError::NonFiniteDecomposition;
        let _: &dyn std::error::Error = &e;
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FevdError>();
    }
}
