//// # Gamma function
////
//// Lanczos approximation with `g = 7` and nine coefficients, the same
//// table used by most numerical recipes. Arguments with real part below
//// `0.5` are mapped into the convergent region through the reflection
//// formula `Γ(z) Γ(1 - z) = π / sin(πz)`.
////
//// The evaluation goes through complex arithmetic: the power `t^(z + 1/2)`
//// is taken on the complex plane so that the same code path serves every
//// argument, and the real part is returned at the end.

use num_complex::Complex64;
use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEF: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Γ evaluated on the complex plane.
pub fn gamma_complex(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        // reflection
        return PI / ((PI * z).sin() * gamma_complex(1.0 - z));
    }
    let z = z - 1.0;
    let series = LANCZOS_COEF
        .iter()
        .enumerate()
        .skip(1)
        .fold(Complex64::new(LANCZOS_COEF[0], 0.0), |acc, (i, &c)| {
            acc + c / (z + i as f64)
        });
    let t = z + LANCZOS_G + 0.5;
    (2.0 * PI).sqrt() * t.powc(z + 0.5) * (-t).exp() * series
}

/// The Gamma function of a real argument.
///
/// Non-positive integers are poles of Γ and are not guarded: the result
/// there is either non-finite or meaninglessly large.
pub fn gamma(x: f64) -> f64 {
    gamma_complex(Complex64::new(x, 0.0)).re
}
