//! # vecar-estimate
//!
//! Least-squares estimation, inference and lag-order selection for VAR(p)
//! models.
//!
//! ## Estimation Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["MultivariateSeries"] -->|"Var::new()"| B["Var"]
//!     B -->|"select_order()"| C["OrderSelection"]
//!     B -->|"estimate() / fit()"| D["VarResults"]
//!     C -->|".selected(ic)"| D
//!     D -->|"Deref"| E["VarProcess"]
//!     D --> F["stderr / pvalues / info_criteria"]
//!     D --> G["forecast_interval() with Omega(h)"]
//!     D --> H["test_causality()"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::Array2;
//! use vecar_estimate::{CausalityKind, InfoCriterion, Trend, Var, VarConfig};
//!
//! let data = Array2::from_shape_fn((120, 2), |(t, i)| {
//!     ((t as f64) * 0.37 + i as f64).sin() + ((t * 13 + i * 7) % 11) as f64 * 0.1
//! });
//! let model = Var::from_array(data).unwrap();
//! let selection = model.select_order(Some(4), Trend::Constant).unwrap();
//! assert!(selection.selected(InfoCriterion::Bic) <= 4);
//!
//! let results = model.fit(&VarConfig::new(2)).unwrap();
//!
//! let test = results
//!     .test_causality("y1", &["y2"], CausalityKind::F, 0.05)
//!     .unwrap();
//! assert!(test.pvalue() >= 0.0 && test.pvalue() <= 1.0);
//! ```

mod causality;
mod config;
mod criteria;
mod design;
mod diagnostics;
mod error;
mod forecast_cov;
mod model;
mod results;
mod selection;
mod trend;

pub use causality::{CausalityKind, CausalityTest, Conclusion};
pub use config::{VarConfig, default_max_lags};
pub use criteria::{InfoCriteria, InfoCriterion};
pub use design::{coef_names, design_matrix};
pub use error::EstimateError;
pub use model::Var;
pub use results::VarResults;
pub use selection::OrderSelection;
pub use trend::Trend;
