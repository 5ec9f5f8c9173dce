//! # vecar-process
//!
//! Vector autoregressive processes with known parameters.
//!
//! A VAR(p) process in `k` variables,
//!
//! ```text
//! y[t] = nu + A_1 y[t-1] + ... + A_p y[t-p] + u[t],   u[t] ~ (0, Sigma_u)
//! ```
//!
//! is stored as a `(p, k, k)` coefficient tensor, an intercept and a noise
//! covariance. Everything derived from those parameters lives here; fitting
//! them to data is the job of `vecar-estimate`.
//!
//! ## Derived quantities
//!
//! ```mermaid
//! graph LR
//!     A["VarProcess"] -->|"companion matrix"| B["is_stable()"]
//!     A -->|"MA recursion"| C["ma_rep() / orth_ma_rep()"]
//!     A -->|"Lyapunov + Yule-Walker"| D["acf() / acorr()"]
//!     A -->|"recursion"| E["forecast()"]
//!     C --> F["mse()"]
//!     E --> G["forecast_interval()"]
//!     F --> G
//!     A -->|"Cholesky innovations"| H["simulate()"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::array;
//! use vecar_process::VarProcess;
//!
//! let process = VarProcess::new(
//!     array![[[0.5, 0.1], [0.2, 0.3]]],
//!     array![1.0, 2.0],
//!     array![[1.0, 0.3], [0.3, 2.0]],
//! )
//! .unwrap();
//!
//! assert!(process.is_stable());
//! let history = array![[1.0, 2.0]];
//! let bundle = process.forecast_interval(history.view(), 5, 0.05).unwrap();
//! assert_eq!(bundle.point().dim(), (5, 2));
//! ```
//!
//! [`linalg`] is public so that downstream crates share one
//! `ndarray`/`nalgebra` bridge.

mod acf;
mod error;
mod forecast;
pub mod linalg;
mod ma;
mod process;
mod series;
mod stability;

pub use acf::{acf_to_acorr, var_acf};
pub use error::ProcessError;
pub use forecast::{
    ForecastBundle, forecast, forecast_cov, forecast_with, interval_from_covs, norm_signif_level,
};
pub use ma::{ma_rep, orth_ma_rep};
pub use process::{VarProcess, Variable};
pub use series::{MultivariateSeries, default_names};
pub use stability::{companion_matrix, eigenvalue_moduli, is_stable};
