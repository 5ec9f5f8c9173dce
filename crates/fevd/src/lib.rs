//! # vecar-fevd
//!
//! Forecast error variance decomposition (FEVD) for VAR(p) processes.
//!
//! For each equation and horizon the decomposition gives the share of the
//! forecast-error variance that comes from each orthogonalised shock. The
//! shares are built from [`VarProcess::orth_ma_rep`](vecar_process::VarProcess::orth_ma_rep)
//! and [`VarProcess::mse`](vecar_process::VarProcess::mse).
//!
//! ```mermaid
//! graph LR
//!     A["VarProcess / VarResults"] -->|"orth_ma_rep()"| B["Psi_0..Psi_{h-1}"]
//!     A -->|"mse()"| C["Sigma_y(1..h)"]
//!     B --> D["Fevd"]
//!     C --> D
//!     D --> E["decomp (equation, horizon, shock)"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::array;
//! use vecar_fevd::{Fevd, FevdConfig};
//! use vecar_process::VarProcess;
//!
//! let process = VarProcess::new(
//!     array![[[0.5, 0.0], [0.4, 0.3]]],
//!     array![0.0, 0.0],
//!     array![[1.0, 0.3], [0.3, 0.8]],
//! )
//! .unwrap();
//!
//! let fevd = Fevd::new(&process, &FevdConfig::new(8)).unwrap();
//! assert_eq!(fevd.decomp().dim(), (2, 8, 2));
//!
//! let y = fevd.equation(1usize).unwrap();
//! assert!((y.row(7).sum() - 1.0).abs() < 1e-10);
//! ```

mod config;
mod error;
mod fevd;

pub use config::FevdConfig;
pub use error::FevdError;
pub use fevd::Fevd;
