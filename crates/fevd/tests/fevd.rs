//! Integration tests for vecar-fevd on estimated models.

use approx::assert_abs_diff_eq;
use ndarray::{Array1, Array2, Array3, array, s};
use proptest::prelude::*;
use rand::SeedableRng;
use vecar_estimate::{Trend, Var};
use vecar_fevd::{Fevd, FevdConfig};
use vecar_process::VarProcess;

fn simulated_fit(seed: u64) -> vecar_estimate::VarResults {
    let process = VarProcess::new(
        array![[[0.5, 0.1, 0.0], [0.2, 0.3, 0.0], [0.1, 0.1, 0.4]]],
        Array1::zeros(3),
        array![[1.0, 0.2, 0.1], [0.2, 0.6, 0.0], [0.1, 0.0, 0.9]],
    )
    .unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let y = process.simulate(300, &mut rng).unwrap();
    Var::from_array(y).unwrap().estimate(2, Trend::Constant).unwrap()
}

#[test]
fn fitted_model_rows_sum_to_one() {
    let results = simulated_fit(1);
    let fevd = Fevd::new(&results, &FevdConfig::new(10)).unwrap();
    assert_eq!(fevd.decomp().dim(), (3, 10, 3));
    assert_eq!(fevd.names(), results.names());
    for j in 0..3 {
        for h in 0..10 {
            let row = fevd.decomp().slice(s![j, h, ..]);
            assert!(row.iter().all(|&v| v >= 0.0));
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-8);
        }
    }
}

#[test]
fn own_share_on_impact_dominates_for_first_variable() {
    let results = simulated_fit(2);
    let fevd = Fevd::new(&results, &FevdConfig::new(1)).unwrap();
    // first in the Cholesky ordering: only its own shock hits on impact
    assert_abs_diff_eq!(fevd.decomp()[[0, 0, 0]], 1.0, epsilon = 1e-12);
}

#[test]
fn shares_converge_for_stable_model() {
    let results = simulated_fit(3);
    let fevd = Fevd::new(&results, &FevdConfig::new(60)).unwrap();
    let late = fevd.decomp().slice(s![.., 58, ..]).to_owned();
    let last = fevd.decomp().slice(s![.., 59, ..]).to_owned();
    for (a, b) in late.iter().zip(last.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-8);
    }
}

fn arbitrary_process() -> impl Strategy<Value = (VarProcess, usize)> {
    (1_usize..=3, 1_usize..=2, any::<u64>(), 1_usize..=15).prop_map(|(k, p, seed, periods)| {
        use rand_distr::{Distribution, Uniform};
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let unit = Uniform::new(-1.0, 1.0).unwrap();
        // row sums of |A| stay below 1 / p
        let scale = 0.9 / (p * k) as f64;
        let coefs = Array3::from_shape_fn((p, k, k), |_| scale * unit.sample(&mut rng));
        let l = Array2::from_shape_fn((k, k), |(i, j)| match i.cmp(&j) {
            std::cmp::Ordering::Greater => unit.sample(&mut rng),
            std::cmp::Ordering::Equal => 0.5 + unit.sample(&mut rng).abs(),
            std::cmp::Ordering::Less => 0.0,
        });
        let sigma = l.dot(&l.t());
        let sigma = (&sigma + &sigma.t()) * 0.5;
        let process = VarProcess::new(coefs, Array1::zeros(k), sigma).unwrap();
        (process, periods)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shares_sum_to_one((process, periods) in arbitrary_process()) {
        let fevd = Fevd::new(&process, &FevdConfig::new(periods)).unwrap();
        let k = process.k();
        prop_assert_eq!(fevd.decomp().dim(), (k, periods, k));
        for j in 0..k {
            for h in 0..periods {
                let row = fevd.decomp().slice(s![j, h, ..]);
                prop_assert!(row.iter().all(|&v| v >= 0.0));
                prop_assert!((row.sum() - 1.0).abs() < 1e-8);
            }
        }
    }
}
