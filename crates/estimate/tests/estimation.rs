//! Integration tests for vecar-estimate.

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use ndarray::{Array2, Array3, array, s};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use vecar_estimate::{
    CausalityKind, Conclusion, EstimateError, InfoCriterion, Trend, Var, VarConfig,
};
use vecar_process::{MultivariateSeries, VarProcess};

fn true_process() -> VarProcess {
    VarProcess::new(
        array![[[0.5, 0.1], [0.2, 0.3]], [[-0.2, 0.0], [0.1, 0.1]]],
        array![0.5, -0.3],
        array![[1.0, 0.2], [0.2, 0.5]],
    )
    .unwrap()
}

fn simulate(process: &VarProcess, n: usize, seed: u64) -> Array2<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    process.simulate(n, &mut rng).unwrap()
}

fn coef_error(fitted: &Array3<f64>, truth: &Array3<f64>) -> f64 {
    fitted
        .iter()
        .zip(truth.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[test]
fn coefficient_error_shrinks_with_sample_size() {
    let process = true_process();
    let truth = process.coefs().to_owned();
    let mean_error = |n: usize| -> f64 {
        let seeds = [11_u64, 12, 13, 14, 15, 16];
        seeds
            .iter()
            .map(|&seed| {
                let y = simulate(&process, n, seed);
                let fit = Var::from_array(y).unwrap().estimate(2, Trend::Constant).unwrap();
                coef_error(&fit.coefs().to_owned(), &truth)
            })
            .sum::<f64>()
            / seeds.len() as f64
    };
    let small = mean_error(100);
    let medium = mean_error(1_000);
    let large = mean_error(10_000);
    assert!(medium < small, "error did not shrink: {small} -> {medium}");
    assert!(large < medium, "error did not shrink: {medium} -> {large}");
    assert!(large < 0.08, "large-sample error too big: {large}");
}

#[test]
fn sigma_u_recovered() {
    let process = true_process();
    let fit = Var::from_array(simulate(&process, 20_000, 5))
        .unwrap()
        .estimate(2, Trend::Constant)
        .unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_abs_diff_eq!(fit.sigma_u()[[i, j]], process.sigma_u()[[i, j]], epsilon = 0.05);
        }
    }
}

#[test]
fn selected_orders_are_argmins_of_individual_fits() {
    let y = simulate(&true_process(), 300, 21);
    let model = Var::from_array(y).unwrap();
    let selection = model.select_order(Some(6), Trend::Constant).unwrap();

    for ic in InfoCriterion::ALL {
        let values: Vec<f64> = (0..=6)
            .map(|p| {
                model
                    .estimate(p, Trend::Constant)
                    .unwrap()
                    .info_criteria()
                    .unwrap()
                    .get(ic)
            })
            .collect();
        assert_eq!(selection.values(ic), values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let first = values.iter().position(|&v| v == min).unwrap();
        assert_eq!(selection.selected(ic), first, "criterion {ic}");
    }
}

#[test]
fn bic_finds_true_order_in_large_sample() {
    let y = simulate(&true_process(), 5_000, 22);
    let model = Var::from_array(y).unwrap();
    let selection = model.select_order(Some(6), Trend::Constant).unwrap();
    assert_eq!(selection.selected(InfoCriterion::Bic), 2);
}

#[test]
fn fit_with_default_bound() {
    let y = simulate(&true_process(), 400, 23);
    let model = Var::from_array(y).unwrap();
    let results = model.fit(&VarConfig::select_by(InfoCriterion::Hqic)).unwrap();
    let selection = model.select_order(None, Trend::Constant).unwrap();
    assert_eq!(selection.max_lags(), vecar_estimate::default_max_lags(400));
    assert_eq!(selection.max_lags(), 17);
    assert_eq!(results.p(), selection.selected(InfoCriterion::Hqic));
}

#[test]
fn dates_and_names_survive_estimation() {
    let y = simulate(&true_process(), 50, 24);
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..50)
        .map(|i| start + chrono::Days::new(i as u64 * 7))
        .collect();
    let series = MultivariateSeries::new(y)
        .unwrap()
        .with_names(["gdp", "rate"])
        .unwrap()
        .with_dates(dates.clone())
        .unwrap();
    let results = Var::new(series).estimate(1, Trend::Constant).unwrap();
    assert_eq!(results.dates().unwrap(), dates.as_slice());
    assert_eq!(results.eq_index("rate").unwrap(), 1);
    assert_eq!(results.coef_names(), &["const", "L1.gdp", "L1.rate"]);
}

#[test]
fn trend_coefficients_recovered() {
    // y[t] = 1 + 0.05 t + 0.4 y[t-1] + u[t]
    let mut rng = rand::rngs::StdRng::seed_from_u64(25);
    let normal = Normal::new(0.0, 0.1).unwrap();
    let n = 500;
    let mut y = Array2::zeros((n, 1));
    for t in 1..n {
        y[[t, 0]] = 1.0 + 0.05 * t as f64 + 0.4 * y[[t - 1, 0]] + normal.sample(&mut rng);
    }
    let results = Var::from_array(y).unwrap().estimate(1, Trend::ConstantLinear).unwrap();
    assert_abs_diff_eq!(results.params()[[1, 0]], 0.05, epsilon = 0.005);
    assert_abs_diff_eq!(results.coefs()[[0, 0, 0]], 0.4, epsilon = 0.05);

    // forecasts continue the trend
    let f = results.forecast_from_sample(3).unwrap();
    assert!(f[[2, 0]] > f[[0, 0]]);
}

#[test]
fn forecast_interval_covers_realisations() {
    let process = true_process();
    let y = simulate(&process, 2_000, 26);
    let results = Var::from_array(y.slice(s![..1_000, ..]).to_owned())
        .unwrap()
        .estimate(2, Trend::Constant)
        .unwrap();
    // one-step intervals rolled over the hold-out sample
    let mut covered = 0;
    let total = 900;
    for t in 1_000..1_000 + total {
        let history = y.slice(s![t - 2..t, ..]);
        let bundle = results.process().forecast_interval(history, 1, 0.05).unwrap();
        if bundle.lower()[[0, 0]] <= y[[t, 0]] && y[[t, 0]] <= bundle.upper()[[0, 0]] {
            covered += 1;
        }
    }
    let rate = covered as f64 / total as f64;
    assert!((0.92..=0.98).contains(&rate), "coverage {rate}");
}

#[test]
fn unknown_tags_name_the_accepted_set() {
    let err = "quadratic".parse::<Trend>().unwrap_err();
    assert!(err.to_string().contains("nc, c, ct, ctt"));
    let err = "lm".parse::<CausalityKind>().unwrap_err();
    assert!(matches!(err, EstimateError::UnknownTestKind { .. }));
}

#[test]
fn white_noise_model_order_zero() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(27);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let y = Array2::from_shape_fn((200, 3), |_| normal.sample(&mut rng));
    let results = Var::from_array(y).unwrap().estimate(0, Trend::Constant).unwrap();
    assert_eq!(results.p(), 0);
    assert_eq!(results.df_model(), 1);
    assert!(results.is_stable());
    let f = results.forecast_from_sample(2).unwrap();
    assert_eq!(f.row(0), results.intercept().view());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn granger_decision_consistent(
        seed in any::<u64>(),
        coupling in -0.6_f64..0.6,
        signif in 0.01_f64..0.5,
        wald in any::<bool>(),
        lags in 1_usize..=3,
    ) {
        let process = VarProcess::new(
            array![[[0.4, 0.0], [coupling, 0.3]]],
            array![0.0, 0.0],
            array![[1.0, 0.0], [0.0, 1.0]],
        ).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let y = process.simulate(150, &mut rng).unwrap();
        let results = Var::from_array(y).unwrap().estimate(lags, Trend::Constant).unwrap();
        let kind = if wald { CausalityKind::Wald } else { CausalityKind::F };

        let test = results.test_causality("y2", &["y1"], kind, signif).unwrap();
        prop_assert!(test.statistic() >= 0.0);
        prop_assert!((0.0..=1.0).contains(&test.pvalue()));
        prop_assert_eq!(
            test.conclusion() == Conclusion::Reject,
            test.statistic() > test.crit_value()
        );
        prop_assert_eq!(test.df().0, lags);
    }
}
