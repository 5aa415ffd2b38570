//// # PERT-Beta distribution
////
//// Binds the support `[a, b]` to a shape `(α, β)`, and optionally to the
//// nominal value the shape was fitted from.
////
//// Two families of moments coexist and are kept apart:
//// the PERT approximations ([`BetaDistribution::mean`],
//// [`BetaDistribution::sigma`]), which are the ones used for reporting,
//// and the exact moments of the Beta distribution
//// ([`BetaDistribution::beta_mean`], [`BetaDistribution::beta_variance`]).

use crate::errors::{PertError, Result};
use crate::integrate::DEFAULT_EPSILON;
use crate::kernel::BetaKernel;
use crate::types::{BetaShapeParams, ShapeInput, Support, ThreePointEstimate};
use log::debug;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt::Display;

/// Width of the longest histogram bar.
pub const MAX_DOTS: usize = 40;

#[derive(Clone, Debug)]
pub struct BetaDistribution {
    support: Support,
    shape: BetaShapeParams,
    nominal: Option<f64>,
    sampler: rand_distr::Beta<f64>,
    kernel: BetaKernel,
}

impl BetaDistribution {
    /// A distribution with an explicit shape, and no nominal value.
    pub fn new(a: f64, b: f64, alpha: f64, beta: f64) -> Result<Self> {
        Self::build(Support::new(a, b)?, BetaShapeParams::new(alpha, beta)?, None)
    }

    /// The PERT-Beta distribution of the estimate `a <= m <= b`.
    pub fn from_three_point(a: f64, m: f64, b: f64) -> Result<Self> {
        Self::from_estimate(&ThreePointEstimate::new(a, m, b)?)
    }

    pub fn from_estimate(estimate: &ThreePointEstimate) -> Result<Self> {
        let shape = estimate.shape();
        debug!(
            "fitted {}/{}/{} to alpha={} beta={}",
            estimate.optimistic, estimate.nominal, estimate.pessimistic, shape.alpha, shape.beta
        );
        Self::build(estimate.support()?, shape, Some(estimate.nominal))
    }

    pub fn from_shape_input(a: f64, b: f64, input: ShapeInput) -> Result<Self> {
        match input {
            ShapeInput::Explicit(shape) => Self::new(a, b, shape.alpha, shape.beta),
            ShapeInput::FromNominal(nominal) => Self::from_three_point(a, nominal, b),
        }
    }

    fn build(support: Support, shape: BetaShapeParams, nominal: Option<f64>) -> Result<Self> {
        shape.check()?;
        let sampler = rand_distr::Beta::new(shape.alpha, shape.beta).map_err(|e| match e {
            rand_distr::BetaError::BetaTooSmall => PertError::domain("beta", shape.beta),
            _ => PertError::domain("alpha", shape.alpha),
        })?;
        Ok(Self {
            support,
            shape,
            nominal,
            sampler,
            kernel: BetaKernel::default(),
        })
    }

    /// Use the given kernel, sharing its cache of normalization constants.
    pub fn with_kernel(mut self, kernel: BetaKernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn a(&self) -> f64 {
        self.support.a
    }

    pub fn b(&self) -> f64 {
        self.support.b
    }

    pub fn alpha(&self) -> f64 {
        self.shape.alpha
    }

    pub fn beta(&self) -> f64 {
        self.shape.beta
    }

    pub fn nominal(&self) -> Option<f64> {
        self.nominal
    }

    pub fn support(&self) -> Support {
        self.support
    }

    pub fn shape(&self) -> BetaShapeParams {
        self.shape
    }

    pub fn kernel(&self) -> &BetaKernel {
        &self.kernel
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.kernel.pdf(x, self.shape, self.support)
    }

    pub fn cdf(&self, x: f64) -> Result<f64> {
        self.cdf_with(x, DEFAULT_EPSILON)
    }

    pub fn cdf_with(&self, x: f64, epsilon: f64) -> Result<f64> {
        self.kernel.cdf(x, self.shape, self.support, epsilon)
    }

    pub fn quantile(&self, conf: f64) -> Result<f64> {
        self.quantile_with(conf, DEFAULT_EPSILON)
    }

    pub fn quantile_with(&self, conf: f64, epsilon: f64) -> Result<f64> {
        self.kernel.quantile(conf, self.shape, self.support, epsilon)
    }

    pub fn quantiles(&self, levels: &[f64]) -> Result<Vec<f64>> {
        levels.iter().map(|&conf| self.quantile(conf)).collect()
    }

    /// PERT mean `(a + 4m + b) / 6`, only known when the nominal value is.
    pub fn mean(&self) -> Option<f64> {
        self.nominal
            .map(|m| (self.support.a + 4.0 * m + self.support.b) / 6.0)
    }

    /// PERT standard deviation `(b - a) / 6`.
    ///
    /// An approximation which ignores the shape entirely.
    pub fn sigma(&self) -> f64 {
        self.support.width() / 6.0
    }

    pub fn pert_variance(&self) -> f64 {
        self.sigma().powi(2)
    }

    /// Exact mean of the Beta distribution over `[a, b]`.
    pub fn beta_mean(&self) -> f64 {
        let BetaShapeParams { alpha, beta } = self.shape;
        self.support.scale(alpha / (alpha + beta))
    }

    /// Exact variance of the Beta distribution over `[a, b]`.
    pub fn beta_variance(&self) -> f64 {
        let BetaShapeParams { alpha, beta } = self.shape;
        let s = alpha + beta;
        (alpha / s) * (beta / s) * (self.support.width().powi(2) / (s + 1.0))
    }

    pub fn beta_sigma(&self) -> f64 {
        self.beta_variance().sqrt()
    }

    pub fn sample(&self) -> f64 {
        self.sample_with(&mut rand::thread_rng())
    }

    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let r: f64 = self.sampler.sample(rng);
        self.support.scale(r)
    }

    /// `n` reproducible draws.
    pub fn samples(&self, n: usize, seed: u64) -> Vec<f64> {
        let rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        rng.sample_iter(&self.sampler)
            .take(n)
            .map(|r| self.support.scale(r))
            .collect()
    }

    /// The probability of each integer unit of the support, i.e. the mass
    /// of `[x - 0.5, x + 0.5]` clipped to `[a, b]`.
    pub fn bucket_probabilities(&self, epsilon: f64) -> Result<Vec<(i64, f64)>> {
        let lo = self.support.a.ceil() as i64;
        let hi = self.support.b.floor() as i64;
        (lo..=hi)
            .map(|x| -> Result<(i64, f64)> {
                let center = x as f64;
                let p = self.kernel.mass(
                    center - 0.5,
                    center + 0.5,
                    self.shape,
                    self.support,
                    epsilon,
                )?;
                Ok((x, p))
            })
            .collect()
    }

    pub fn histogram(&self, max_dots: usize, epsilon: f64) -> Result<Histogram> {
        Ok(Histogram::from_probabilities(
            self.bucket_probabilities(epsilon)?,
            max_dots,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramRow {
    pub unit: i64,
    pub cumulative_percent: f64,
    pub dots: usize,
}

impl Display for HistogramRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:5} {:6.2} {}",
            self.unit,
            self.cumulative_percent,
            "*".repeat(self.dots)
        )
    }
}

/// A text histogram: one row per unit, with the running CDF and a bar
/// scaled so that the most likely unit gets the full width.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    rows: Vec<HistogramRow>,
}

pub const HISTOGRAM_HEADER: &str = "units    CDF PDF";

fn round_half_up(x: f64) -> usize {
    (x + 0.5).floor() as usize
}

impl Histogram {
    pub fn from_probabilities(buckets: Vec<(i64, f64)>, max_dots: usize) -> Self {
        let max_prob = buckets.iter().map(|&(_, p)| p).fold(0.0, f64::max);
        let mut cdf = 0.0;
        let rows = buckets
            .into_iter()
            .map(|(unit, p)| {
                cdf += p;
                let dots = if max_prob > 0.0 {
                    round_half_up(max_dots as f64 * p / max_prob)
                } else {
                    0
                };
                HistogramRow {
                    unit,
                    cumulative_percent: 100.0 * cdf,
                    dots,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[HistogramRow] {
        &self.rows
    }

    /// The header line followed by one line per row.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(HISTOGRAM_HEADER.to_owned()).chain(self.rows.iter().map(|r| r.to_string()))
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl IntoIterator for Histogram {
    type Item = HistogramRow;
    type IntoIter = std::vec::IntoIter<HistogramRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
