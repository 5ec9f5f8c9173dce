//! Integration tests for vecar-process.

use approx::assert_abs_diff_eq;
use ndarray::{Array2, Array3, ArrayView2, array, s};
use rand::SeedableRng;
use vecar_process::{VarProcess, eigenvalue_moduli, var_acf};

fn lutkepohl_like() -> VarProcess {
    // Investment / income / consumption VAR(2) in first differences of logs
    let coefs = Array3::from_shape_vec(
        (2, 3, 3),
        vec![
            -0.320, 0.146, 0.961, //
            0.044, -0.153, 0.289, //
            -0.002, 0.225, -0.264, //
            -0.161, 0.115, 0.934, //
            0.050, 0.019, -0.010, //
            0.034, 0.355, -0.022,
        ],
    )
    .unwrap();
    let sigma = array![
        [21.30, 0.72, 1.23],
        [0.72, 1.37, 0.61],
        [1.23, 0.61, 0.89]
    ] * 1e-4;
    VarProcess::new(coefs, array![-0.017, 0.016, 0.013], sigma)
        .unwrap()
        .with_names(["invest", "income", "consum"])
        .unwrap()
}

#[test]
fn trivariate_process_is_stable() {
    let process = lutkepohl_like();
    assert!(process.is_stable());
    let moduli = eigenvalue_moduli(process.coefs());
    assert_eq!(moduli.len(), 6);
    assert!(moduli.iter().all(|&m| m < 1.0));
}

#[test]
fn acf_is_consistent_with_mse_limit() {
    // Sigma_y(h) converges to Gamma(0) as h grows.
    let process = lutkepohl_like();
    let gamma0 = process.acf(Some(0)).unwrap();
    let mse = process.mse(200);
    for i in 0..3 {
        for j in 0..3 {
            assert_abs_diff_eq!(mse[[199, i, j]], gamma0[[0, i, j]], epsilon = 1e-10);
        }
    }
}

#[test]
fn acf_lag0_is_symmetric_and_lag_h_transposes() {
    let process = lutkepohl_like();
    let acf = process.acf(Some(4)).unwrap();
    let g0: ArrayView2<f64> = acf.slice(s![0, .., ..]);
    for i in 0..3 {
        for j in 0..3 {
            assert_abs_diff_eq!(g0[[i, j]], g0[[j, i]], epsilon = 1e-12);
        }
    }
    // Gamma(1) = A_1 Gamma(0) + A_2 Gamma(-1) = A_1 Gamma(0) + A_2 Gamma(1)'
    let a1: Array2<f64> = process.coefs().slice(s![0, .., ..]).to_owned();
    let a2: Array2<f64> = process.coefs().slice(s![1, .., ..]).to_owned();
    let g1: Array2<f64> = acf.slice(s![1, .., ..]).to_owned();
    let rebuilt: Array2<f64> = a1.dot(&g0) + a2.dot(&g1.t());
    for (x, y) in rebuilt.iter().zip(g1.iter()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn free_function_acf_matches_method() {
    let process = lutkepohl_like();
    let via_fn = var_acf(process.coefs(), process.sigma_u().view(), 3).unwrap();
    let via_method = process.acf(Some(3)).unwrap();
    assert_eq!(via_fn, via_method);
}

#[test]
fn forecasts_converge_to_mean() {
    let process = lutkepohl_like();
    let history = Array2::<f64>::zeros((2, 3));
    let f = process.forecast(history.view(), 300).unwrap();
    let mu = process.mean().unwrap();
    for i in 0..3 {
        assert_abs_diff_eq!(f[[299, i]], mu[i], epsilon = 1e-9);
    }
}

#[test]
fn interval_width_grows_with_horizon() {
    let process = lutkepohl_like();
    let history = Array2::<f64>::zeros((2, 3));
    let bundle = process.forecast_interval(history.view(), 8, 0.05).unwrap();
    for i in 0..3 {
        let widths: Vec<f64> = (0..8)
            .map(|h| bundle.upper()[[h, i]] - bundle.lower()[[h, i]])
            .collect();
        for pair in widths.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-15, "widths not monotone: {widths:?}");
        }
    }
}

#[test]
fn simulated_sample_covariance_matches_acf() {
    let process = VarProcess::new(
        array![[[0.5, 0.1], [0.2, 0.3]]],
        array![0.0, 0.0],
        array![[1.0, 0.3], [0.3, 2.0]],
    )
    .unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let path = process.simulate(50_000, &mut rng).unwrap();
    let n = path.nrows() as f64;
    let mean = path.mean_axis(ndarray::Axis(0)).unwrap();
    let centered = &path - &mean;
    let sample_cov = centered.t().dot(&centered) / n;
    let gamma0 = process.acf(Some(0)).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            let rel = (sample_cov[[i, j]] - gamma0[[0, i, j]]).abs() / gamma0[[0, i, i]];
            assert!(rel < 0.05, "cov[{i},{j}] off by {rel}");
        }
    }
}

#[test]
fn orth_ma_rep_accepts_custom_factor() {
    let process = lutkepohl_like();
    let chol = process.chol_sigma_u().unwrap().clone();
    let default = process.orth_ma_rep(5, None).unwrap();
    let explicit = process.orth_ma_rep(5, Some(chol.view())).unwrap();
    assert_eq!(default, explicit);
}
