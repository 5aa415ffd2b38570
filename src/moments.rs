//// # PERT moment matching
////
//// Shape parameters of the Beta distribution fitted to a three-point
//// estimate (Davis, 2008):
////
//// ```text
//// alpha = 2 (b + 4m - 5a) / (3 (b - a)) * (1 + 4 (m - a)(b - m) / (b - a)^2)
//// beta  = 2 (5b - 4m - a) / (3 (b - a)) * (1 + 4 (m - a)(b - m) / (b - a)^2)
//// ```

use crate::errors::{PertError, Result};
use crate::types::{BetaShapeParams, Support, ThreePointEstimate};

/// Closed-form shape parameters for the bounds `a`, `b` and the mode `m`.
///
/// `m` is not required to lie in `[a, b]`: outside of it the formulas
/// still produce numbers, which may even be non-positive. Only the
/// zero-width support is rejected, since it would divide by zero.
pub fn shape_from_three_point(a: f64, m: f64, b: f64) -> Result<BetaShapeParams> {
    if a == b {
        return Err(PertError::DegenerateSupport { a, b });
    }
    if !m.is_finite() {
        return Err(PertError::domain("nominal", m));
    }
    Ok(pert_shape(a, m, b))
}

fn pert_shape(a: f64, m: f64, b: f64) -> BetaShapeParams {
    let width = b - a;
    let first_denom = 3.0 * width;
    let second = 1.0 + 4.0 * ((m - a) * (b - m) / (width * width));
    let alpha = 2.0 * (b + 4.0 * m - 5.0 * a) / first_denom * second;
    let beta = 2.0 * (5.0 * b - 4.0 * m - a) / first_denom * second;
    BetaShapeParams { alpha, beta }
}

impl ThreePointEstimate {
    /// The PERT shape of an (already validated) estimate.
    pub fn shape(&self) -> BetaShapeParams {
        pert_shape(self.optimistic, self.nominal, self.pessimistic)
    }
}

/// Validates the estimate, then fits the shape.
pub fn fit(optimistic: f64, nominal: f64, pessimistic: f64) -> Result<(Support, BetaShapeParams)> {
    let estimate = ThreePointEstimate::new(optimistic, nominal, pessimistic)?;
    Ok((estimate.support()?, estimate.shape()))
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_symmetric() {
        let s = shape_from_three_point(0.0, 0.5, 1.0).unwrap();
        assert_abs_diff_eq!(s.alpha, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.beta, 4.0, epsilon = 1e-12);
        let s = shape_from_three_point(9.0, 12.0, 15.0).unwrap();
        assert_abs_diff_eq!(s.alpha, s.beta, epsilon = 1e-12);
    }

    #[test]
    fn test_skewed() {
        let s = shape_from_three_point(3.0, 4.0, 20.0).unwrap();
        assert_abs_diff_eq!(s.alpha, 1.005_902_7, epsilon = 1e-6);
        assert_abs_diff_eq!(s.beta, 3.879_910_4, epsilon = 1e-6);
        // the exact Beta mean of the fitted shape is the PERT mean
        let mean = 3.0 + 17.0 * s.alpha / (s.alpha + s.beta);
        assert_abs_diff_eq!(mean, 6.5, epsilon = 1e-9);

        let s = shape_from_three_point(0.0, 0.25, 1.0).unwrap();
        assert_abs_diff_eq!(s.alpha, 7.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.beta, 14.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_on_the_bounds() {
        let s = shape_from_three_point(0.0, 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(s.alpha, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.beta, 10.0 / 3.0, epsilon = 1e-12);
        let s = shape_from_three_point(0.0, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(s.alpha, 10.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_outside_is_not_clamped() {
        let s = shape_from_three_point(0.0, 2.0, 1.0).unwrap();
        assert_abs_diff_eq!(s.alpha, -42.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.beta, 14.0, epsilon = 1e-9);
        assert!(fit(0.0, 2.0, 1.0).is_err());
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(
            shape_from_three_point(4.0, 4.0, 4.0),
            Err(PertError::DegenerateSupport { a: 4.0, b: 4.0 })
        );
        assert!(fit(4.0, 4.0, 4.0).is_err());
    }

    #[test]
    fn test_fit_agrees() {
        let (support, shape) = fit(3.0, 4.0, 20.0).unwrap();
        assert_eq!(support, Support { a: 3.0, b: 20.0 });
        assert_eq!(Ok(shape), shape_from_three_point(3.0, 4.0, 20.0));
    }
}
