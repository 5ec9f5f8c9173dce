//! Lag-order selection by information criteria.

use tracing::{info, warn};

use crate::criteria::{InfoCriteria, InfoCriterion};
use crate::error::EstimateError;
use crate::model::Var;
use crate::trend::Trend;

/// Criteria for every candidate order and the per-criterion minimisers.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSelection {
    /// `table[p]` holds the criteria of the VAR(p) fit.
    table: Vec<InfoCriteria>,
    trend: Trend,
}

impl OrderSelection {
    /// Builds a selection from criteria indexed by lag order.
    pub fn from_table(table: Vec<InfoCriteria>, trend: Trend) -> Self {
        Self { table, trend }
    }

    /// Largest candidate order.
    pub fn max_lags(&self) -> usize {
        self.table.len().saturating_sub(1)
    }

    /// Deterministic terms used for every candidate.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Criteria indexed by lag order; failed orders hold `+inf`.
    pub fn table(&self) -> &[InfoCriteria] {
        &self.table
    }

    /// Values of one criterion across orders `0..=max_lags`.
    pub fn values(&self, criterion: InfoCriterion) -> Vec<f64> {
        self.table.iter().map(|ic| ic.get(criterion)).collect()
    }

    /// Order minimising `criterion`; ties go to the smallest order.
    pub fn selected(&self, criterion: InfoCriterion) -> usize {
        argmin_first(&self.values(criterion))
    }
}

/// Index of the first minimum. NaN never wins.
fn argmin_first(values: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v < best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

#[tracing::instrument(skip_all, fields(max_lags = max_lags, trend = %trend))]
pub(crate) fn select_order(
    model: &Var,
    max_lags: usize,
    trend: Trend,
) -> Result<OrderSelection, EstimateError> {
    let mut table = Vec::with_capacity(max_lags + 1);
    let mut any_ok = false;
    for p in 0..=max_lags {
        match model.estimate(p, trend).and_then(|r| r.info_criteria()) {
            Ok(ic) => {
                any_ok = true;
                table.push(ic);
            }
            Err(e) => {
                warn!(lags = p, error = %e, "candidate order failed, scoring +inf");
                table.push(InfoCriteria::infinite());
            }
        }
    }
    if !any_ok {
        return Err(EstimateError::NoCandidateOrder { max_lags });
    }

    let selection = OrderSelection::from_table(table, trend);
    for ic in InfoCriterion::ALL {
        info!(ic = %ic, lags = selection.selected(ic), "order selected");
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn ic(aic: f64, bic: f64, hqic: f64, fpe: f64) -> InfoCriteria {
        InfoCriteria { aic, bic, hqic, fpe }
    }

    #[test]
    fn argmin_ties_go_to_first() {
        assert_eq!(argmin_first(&[3.0, 1.0, 1.0, 2.0]), 1);
        assert_eq!(argmin_first(&[1.0, 1.0]), 0);
        assert_eq!(argmin_first(&[f64::NAN, 2.0, 1.0]), 2);
        assert_eq!(argmin_first(&[f64::INFINITY, 5.0]), 1);
    }

    #[test]
    fn per_criterion_selection() {
        let selection = OrderSelection::from_table(
            vec![
                ic(3.0, 1.0, 2.0, 9.0),
                ic(1.0, 2.0, 2.0, 8.0),
                ic(2.0, 3.0, 1.0, 8.0),
            ],
            Trend::Constant,
        );
        assert_eq!(selection.selected(InfoCriterion::Aic), 1);
        assert_eq!(selection.selected(InfoCriterion::Bic), 0);
        assert_eq!(selection.selected(InfoCriterion::Hqic), 2);
        assert_eq!(selection.selected(InfoCriterion::Fpe), 1);
        assert_eq!(selection.max_lags(), 2);
    }

    #[test]
    fn all_failing_is_an_error() {
        // two rows cannot carry a constant and a linear trend at any order
        let y = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 5.0]).unwrap();
        let model = Var::from_array(y).unwrap();
        assert!(matches!(
            model.select_order(Some(1), Trend::ConstantLinear),
            Err(EstimateError::NoCandidateOrder { max_lags: 1 })
        ));
    }

    #[test]
    fn failing_high_orders_score_infinite() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let y = Array2::from_shape_fn((12, 2), |_| normal.sample(&mut rng));
        let model = Var::from_array(y).unwrap();
        // p = 5: 7 rows, 11 regressors
        let selection = model.select_order(Some(5), Trend::Constant).unwrap();
        assert_eq!(selection.table().len(), 6);
        assert!(selection.values(InfoCriterion::Aic)[5].is_infinite());
        assert!(selection.selected(InfoCriterion::Aic) < 5);
    }
}
