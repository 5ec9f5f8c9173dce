//! Validated multivariate time series.

use std::collections::HashSet;

use chrono::NaiveDate;
use ndarray::{Array2, ArrayView2};

use crate::error::ProcessError;

/// A validated `T x k` multivariate series with variable names and optional
/// observation dates.
///
/// Guarantees:
/// - at least one observation and one variable
/// - all values are finite
/// - exactly `k` unique names (defaults to `y1..yk`)
/// - when present, exactly `T` dates (ordering is not checked)
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use vecar_process::MultivariateSeries;
///
/// let series = MultivariateSeries::new(array![[1.0, 2.0], [1.5, 2.5]])
///     .unwrap()
///     .with_names(["gdp", "cons"])
///     .unwrap();
/// assert_eq!(series.names(), &["gdp".to_string(), "cons".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct MultivariateSeries {
    data: Array2<f64>,
    names: Vec<String>,
    dates: Option<Vec<NaiveDate>>,
}

impl MultivariateSeries {
    /// Creates a new series after validating the data.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ProcessError::EmptySeries`] | no rows or no columns |
    /// | [`ProcessError::NonFiniteInput`] | any element is NaN or infinite |
    pub fn new(data: Array2<f64>) -> Result<Self, ProcessError> {
        let (nobs, k) = data.dim();
        if nobs == 0 || k == 0 {
            return Err(ProcessError::EmptySeries { nobs, k });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(ProcessError::NonFiniteInput { input: "series" });
        }
        Ok(Self {
            data,
            names: default_names(k),
            dates: None,
        })
    }

    /// Replaces the default variable names.
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

    /// Attaches one date per observation.
    ///
    /// # Errors
    ///
    /// [`ProcessError::DateCountMismatch`] when `dates.len() != T`.
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Result<Self, ProcessError> {
        if dates.len() != self.nobs() {
            return Err(ProcessError::DateCountMismatch {
                got: dates.len(),
                nobs: self.nobs(),
            });
        }
        self.dates = Some(dates);
        Ok(self)
    }

    /// Returns the observations as a `T x k` view.
    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Returns the number of observations `T`.
    pub fn nobs(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of variables `k`.
    pub fn k(&self) -> usize {
        self.data.ncols()
    }

    /// Returns the variable names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the observation dates, if any.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }
}

/// Default variable names `y1, ..., yk`.
pub fn default_names(k: usize) -> Vec<String> {
    (1..=k).map(|i| format!("y{i}")).collect()
}

/// Checks that `names` holds exactly `k` distinct entries.
pub(crate) fn validate_names<I, S>(names: I, k: usize) -> Result<Vec<String>, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    if names.len() != k {
        return Err(ProcessError::NameCountMismatch {
            got: names.len(),
            k,
        });
    }
    {
        let mut seen = HashSet::with_capacity(k);
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ProcessError::DuplicateName { name: name.clone() });
            }
        }
    }
    Ok(names)
}
