//// # Numerical integration
////
//// Fixed-step trapezoidal quadrature. The stepping is exposed as an
//// iterator of [`Step`]s so that both the definite integral and the
//// searches that stop as soon as a target mass is reached (the quantile)
//// share the same primitive.
////
//// The cost is `(hi - lo) / epsilon` steps: `epsilon` is the only
//// accuracy/performance knob.

/// Default step width, used by the CDF, the quantile search and the histograms.
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Finer step width, for callers that can afford ten times more evaluations.
pub const FINE_EPSILON: f64 = 0.0001;

/// The area of one trapezoid, paired with the right edge it reaches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub area: f64,
    pub right: f64,
}

/// Iterator over the trapezoids covering `[lo, hi]`.
///
/// The sequence is finite and depends only on its inputs: cloning it, or
/// building a new one with the same arguments, restarts it.
#[derive(Clone)]
pub struct Steps<F> {
    f: F,
    t: f64,
    hi: f64,
    epsilon: f64,
    /// `f` evaluated at the current left edge, carried over from the previous step
    carry: Option<f64>,
    done: bool,
}

impl<F: Fn(f64) -> f64> Iterator for Steps<F> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let t = self.t;
        let tr = self.hi.min(t + self.epsilon);
        if !(tr > t) {
            // `t + epsilon` rounds back to `t`: no further progress is possible
            self.done = true;
            return None;
        }
        let y = self.carry.take().unwrap_or_else(|| (self.f)(t));
        let yr = (self.f)(tr);
        let area = (y + yr) / 2.0 * (tr - t);

        if tr >= self.hi {
            self.done = true;
        } else {
            self.t = tr;
            self.carry = Some(yr);
        }
        Some(Step { area, right: tr })
    }
}

impl<F: Fn(f64) -> f64> std::iter::FusedIterator for Steps<F> {}

/// Lazily integrate `f` over `[lo, hi]` in steps of width `epsilon`.
///
/// An empty interval (`lo >= hi`) yields no steps. The iteration also ends
/// where `epsilon` is below the floating point resolution at `t`, so the
/// steps may stop short of `hi`: callers that need the full interval
/// check [`step_resolves`] first.
pub fn integrate_steps<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64, epsilon: f64) -> Steps<F> {
    assert!(
        epsilon > 0.0 && epsilon.is_finite(),
        "integration step must be positive, got {}",
        epsilon
    );
    Steps {
        f,
        t: lo,
        hi,
        epsilon,
        carry: None,
        // NaN bounds fall here too
        done: !(lo < hi),
    }
}

/// True when stepping by `epsilon` advances at every point of `[lo, hi]`.
pub fn step_resolves(lo: f64, hi: f64, epsilon: f64) -> bool {
    let top = lo.abs().max(hi.abs());
    top + epsilon > top
}

/// Definite integral of `f` over `[lo, hi]`; zero when `lo >= hi`.
pub fn integrate<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64, epsilon: f64) -> f64 {
    integrate_steps(f, lo, hi, epsilon).map(|s| s.area).sum()
}
