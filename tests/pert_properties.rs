use approx::assert_abs_diff_eq;
use pertbeta::integrate::{integrate, DEFAULT_EPSILON};
use pertbeta::kernel::{BetaKernel, DEFAULT_INFINITE};
use pertbeta::moments::shape_from_three_point;
use pertbeta::report::MultiEstimate;
use pertbeta::{BetaDistribution, BetaShapeParams, PertError, Support};

const ESTIMATES: [(f64, f64, f64); 6] = [
    (0.0, 0.5, 1.0),
    (0.0, 0.25, 1.0),
    (0.0, 0.75, 2.0),
    (3.0, 4.0, 20.0),
    (9.0, 12.0, 15.0),
    (1.0, 1.0, 5.0),
];

#[test]
fn pdf_is_a_density() {
    let kernel = BetaKernel::new();
    for &(a, m, b) in ESTIMATES.iter() {
        let shape = shape_from_three_point(a, m, b).unwrap();
        let support = Support { a, b };
        let f = kernel.density(shape, support, DEFAULT_INFINITE);
        for i in -10..=110 {
            let x = a + (b - a) * i as f64 / 100.0;
            let y = kernel.pdf(x, shape, support);
            assert!(y >= 0.0);
            assert_eq!(y, f(x));
            if !(a..=b).contains(&x) {
                assert_eq!(y, 0.0);
            }
        }
        // a singular boundary (alpha < 1 when m == a) loses O(epsilon^alpha) mass
        let total = integrate(&f, a, b, DEFAULT_EPSILON);
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-2);
        if shape.alpha >= 1.0 {
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-3);
        }
    }
}

#[test]
fn cdf_goes_from_zero_to_one() {
    for &(a, m, b) in ESTIMATES.iter() {
        let dist = BetaDistribution::from_three_point(a, m, b).unwrap();
        assert_abs_diff_eq!(dist.cdf(a).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dist.cdf(b).unwrap(), 1.0, epsilon = 1e-2);
        let mut last = 0.0;
        for i in 0..=20 {
            let c = dist.cdf(a + (b - a) * i as f64 / 20.0).unwrap();
            assert!(c >= last);
            last = c;
        }
    }
}

#[test]
fn quantile_inverts_cdf() {
    for &(a, m, b) in ESTIMATES.iter() {
        let dist = BetaDistribution::from_three_point(a, m, b).unwrap();
        for i in 1..10 {
            let x = a + (b - a) * i as f64 / 10.0;
            let q = dist.quantile(dist.cdf(x).unwrap()).unwrap();
            assert_abs_diff_eq!(q, x, epsilon = 2.0 * DEFAULT_EPSILON);
        }
    }
}

#[test]
fn documented_scenario() {
    let dist = BetaDistribution::from_three_point(3.0, 4.0, 20.0).unwrap();
    assert_abs_diff_eq!(dist.mean().unwrap(), 6.5, epsilon = 1e-12);
    assert_abs_diff_eq!(dist.sigma(), 2.833, epsilon = 1e-3);

    let explicit = BetaDistribution::new(3.0, 20.0, 0.8, 3.2).unwrap();
    let q80 = explicit.quantile(0.8).unwrap();
    assert!(q80 > 8.0 && q80 < 9.4, "q80 = {}", q80);
}

#[test]
fn symmetric_estimate() {
    let shape = shape_from_three_point(0.0, 0.5, 1.0).unwrap();
    assert_abs_diff_eq!(shape.alpha, 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(shape.beta, 4.0, epsilon = 1e-12);
}

#[test]
fn degenerate_estimates_are_rejected() {
    assert_eq!(
        shape_from_three_point(7.0, 7.0, 7.0),
        Err(PertError::DegenerateSupport { a: 7.0, b: 7.0 })
    );
    assert_eq!(
        BetaDistribution::from_three_point(7.0, 7.0, 7.0).unwrap_err(),
        PertError::DegenerateSupport { a: 7.0, b: 7.0 }
    );
    let kernel = BetaKernel::new();
    let shape = BetaShapeParams {
        alpha: 2.0,
        beta: 2.0,
    };
    let flat = Support { a: 7.0, b: 7.0 };
    assert!(kernel.cdf(7.0, shape, flat, DEFAULT_EPSILON).is_err());
    assert!(kernel.quantile(0.5, shape, flat, DEFAULT_EPSILON).is_err());
    assert_eq!(kernel.pdf(7.0, shape, flat), 0.0);
}

#[test]
fn gamma_canary() {
    assert_abs_diff_eq!(pertbeta::gamma::gamma(10.0), 362880.0, epsilon = 1e-6);
}

#[test]
fn report_aggregation() {
    let mut report = MultiEstimate::new();
    let tasks = [(1.0, 2.0, 6.0), (2.0, 3.0, 10.0), (3.0, 4.0, 20.0)];
    for (i, &(a, m, b)) in tasks.iter().enumerate() {
        let estimate = pertbeta::ThreePointEstimate::new(a, m, b).unwrap();
        report.push(format!("task-{}", i), estimate).unwrap();
    }
    let total = report.total();
    let means: f64 = report.rows().map(|r| r.mean).sum();
    let variance: f64 = report.rows().map(|r| r.sigma.powi(2)).sum();
    assert_abs_diff_eq!(total.mean, means, epsilon = 1e-12);
    assert_abs_diff_eq!(total.sigma, variance.sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(total.mean_plus_2sigma, means + 2.0 * variance.sqrt(), epsilon = 1e-12);
    // independent sigmas add up to less than their sum
    assert!(total.sigma < report.rows().map(|r| r.sigma).sum::<f64>());
}
