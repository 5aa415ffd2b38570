//// # Beta kernel
////
//// Density, cumulative distribution and quantile of a Beta distribution
//// stretched over the support `[a, b]`. The normalization constant is the
//// Gamma ratio `Γ(α) Γ(β) / Γ(α + β)`; the width of the support enters
//// the denominator of the density as `(b - a)^(α + β - 1)`, never the
//// constant itself.
////
//// Constants are memoized in a [`BetaCache`], keyed by the four
//// parameters `(α, β, a, b)`.

use crate::errors::{PertError, Result};
use crate::gamma::gamma;
use crate::integrate::{integrate, integrate_steps, step_resolves};
use crate::types::{BetaShapeParams, Support};
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Finite value substituted for the density numerator where it diverges,
/// i.e. at `x = a` when `α < 1` and at `x = b` when `β < 1`.
///
/// This is an approximation: the singularity is integrable, and replacing
/// it by a finite value only loses part of the mass of the first (or last)
/// integration step.
pub const DEFAULT_INFINITE: f64 = 10.0;

type CacheKey = [u64; 4];

fn cache_key(shape: BetaShapeParams, support: Support) -> CacheKey {
    [
        shape.alpha.to_bits(),
        shape.beta.to_bits(),
        support.a.to_bits(),
        support.b.to_bits(),
    ]
}

/// Memoized normalization constants.
///
/// Entries are never evicted. A bounded cache stops storing new entries
/// once full, and keeps computing them on every request.
#[derive(Debug, Default)]
pub struct BetaCache {
    entries: Mutex<HashMap<CacheKey, f64>>,
    capacity: Option<usize>,
}

impl BetaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<f64> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).copied()
    }

    fn store(&self, key: CacheKey, value: f64) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if self.capacity.map_or(true, |cap| entries.len() < cap) {
            entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// The numerator `(x - a)^(α - 1) (b - x)^(β - 1)` of the density.
///
/// Zero outside `[a, b]` and for non-positive shapes; `infinite` where the
/// numerator would divide by zero.
pub fn pdf_numerator(x: f64, shape: BetaShapeParams, support: Support, infinite: f64) -> f64 {
    let Support { a, b } = support;
    if !support.contains(x) || !shape.is_valid() {
        return 0.0;
    }
    if (x == a && shape.alpha < 1.0) || (x == b && shape.beta < 1.0) {
        return infinite;
    }
    (x - a).powf(shape.alpha - 1.0) * (b - x).powf(shape.beta - 1.0)
}

/// Handle to the Beta computations, sharing one [`BetaCache`] between clones.
#[derive(Clone, Debug, Default)]
pub struct BetaKernel {
    cache: Arc<BetaCache>,
}

impl BetaKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Arc<BetaCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &BetaCache {
        &self.cache
    }

    /// `B(α, β) = Γ(α) Γ(β) / Γ(α + β)`, memoized per `(α, β, a, b)`.
    pub fn normalizing_constant(&self, shape: BetaShapeParams, support: Support) -> f64 {
        let key = cache_key(shape, support);
        if let Some(value) = self.cache.lookup(&key) {
            return value;
        }
        let BetaShapeParams { alpha, beta } = shape;
        let value = gamma(alpha) * gamma(beta) / gamma(alpha + beta);
        debug!(
            "B({}, {}) on [{}, {}] = {}",
            alpha, beta, support.a, support.b, value
        );
        self.cache.store(key, value);
        value
    }

    /// `B(α, β) (b - a)^(α + β - 1)`, the denominator of the density.
    fn denominator(&self, shape: BetaShapeParams, support: Support) -> f64 {
        self.normalizing_constant(shape, support)
            * support.width().powf(shape.alpha + shape.beta - 1.0)
    }

    /// The density as a closure, with the normalization resolved once.
    ///
    /// Zero everywhere when the support is empty or degenerate, and when
    /// the normalization is not representable (e.g. `Γ(α)` overflows).
    pub fn density(
        &self,
        shape: BetaShapeParams,
        support: Support,
        infinite: f64,
    ) -> impl Fn(f64) -> f64 + Clone {
        let denominator = if support.a < support.b && shape.is_valid() {
            self.denominator(shape, support)
        } else {
            f64::NAN
        };
        move |x| {
            if !(denominator.is_finite() && denominator > 0.0) || !support.contains(x) {
                return 0.0;
            }
            pdf_numerator(x, shape, support, infinite) / denominator
        }
    }

    /// The density for the integrating operations, which must not silently
    /// integrate to zero: fails when the normalization is not representable,
    /// or when `epsilon` is too small to step across the support.
    fn checked_density(
        &self,
        shape: BetaShapeParams,
        support: Support,
        epsilon: f64,
    ) -> Result<impl Fn(f64) -> f64 + Clone> {
        if !step_resolves(support.a, support.b, epsilon) {
            return Err(PertError::domain("epsilon", epsilon));
        }
        let denominator = self.denominator(shape, support);
        if !(denominator.is_finite() && denominator > 0.0) {
            debug!(
                "B({}, {}) on [{}, {}] not representable: {}",
                shape.alpha, shape.beta, support.a, support.b, denominator
            );
            return Err(PertError::domain("alpha + beta", shape.alpha + shape.beta));
        }
        Ok(self.density(shape, support, DEFAULT_INFINITE))
    }

    pub fn pdf(&self, x: f64, shape: BetaShapeParams, support: Support) -> f64 {
        self.pdf_with_sentinel(x, shape, support, DEFAULT_INFINITE)
    }

    pub fn pdf_with_sentinel(
        &self,
        x: f64,
        shape: BetaShapeParams,
        support: Support,
        infinite: f64,
    ) -> f64 {
        if !support.contains(x) {
            return 0.0;
        }
        self.density(shape, support, infinite)(x)
    }

    /// Probability mass between `lo` and `hi`, both clamped to the support.
    pub fn mass(
        &self,
        lo: f64,
        hi: f64,
        shape: BetaShapeParams,
        support: Support,
        epsilon: f64,
    ) -> Result<f64> {
        check_epsilon(epsilon)?;
        support.check()?;
        shape.check()?;
        let f = self.checked_density(shape, support, epsilon)?;
        Ok(integrate(f, lo.max(support.a), hi.min(support.b), epsilon))
    }

    pub fn cdf(&self, x: f64, shape: BetaShapeParams, support: Support, epsilon: f64) -> Result<f64> {
        check_epsilon(epsilon)?;
        support.check()?;
        if !support.contains(x) {
            return Err(PertError::domain("x", x));
        }
        shape.check()?;
        let f = self.checked_density(shape, support, epsilon)?;
        Ok(integrate(f, support.a, x, epsilon))
    }

    /// The right edge of the first integration step at which the
    /// accumulated mass reaches `conf`.
    ///
    /// When rounding keeps the total mass below `conf`, the accumulated
    /// mass itself is returned instead of a point of the support.
    pub fn quantile(
        &self,
        conf: f64,
        shape: BetaShapeParams,
        support: Support,
        epsilon: f64,
    ) -> Result<f64> {
        if !(0.0..=1.0).contains(&conf) {
            return Err(PertError::domain("confidence", conf));
        }
        shape.check()?;
        check_epsilon(epsilon)?;
        support.check()?;

        let f = self.checked_density(shape, support, epsilon)?;
        let mut total = 0.0;
        for step in integrate_steps(f, support.a, support.b, epsilon) {
            total += step.area;
            if total >= conf {
                trace!("quantile {} reached at {}", conf, step.right);
                return Ok(step.right);
            }
        }
        warn!(
            "quantile {} not reached, total mass is {}: returning the mass",
            conf, total
        );
        Ok(total)
    }
}

fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon > 0.0 && epsilon.is_finite() {
        Ok(())
    } else {
        Err(PertError::domain("epsilon", epsilon))
    }
}
