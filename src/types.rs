use crate::errors::{PertError, Result};

/// Optimistic / nominal / pessimistic estimate of a duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreePointEstimate {
    pub optimistic: f64,
    pub nominal: f64,
    pub pessimistic: f64,
}

impl ThreePointEstimate {
    /// Checks `optimistic <= nominal <= pessimistic` and that the range is not empty.
    pub fn new(optimistic: f64, nominal: f64, pessimistic: f64) -> Result<Self> {
        let estimate = Self {
            optimistic,
            nominal,
            pessimistic,
        };
        estimate.support()?;
        if !(optimistic <= nominal && nominal <= pessimistic) {
            return Err(PertError::InvalidEstimate {
                optimistic,
                nominal,
                pessimistic,
            });
        }
        Ok(estimate)
    }

    pub fn support(&self) -> Result<Support> {
        Support::new(self.optimistic, self.pessimistic)
    }
}

/// Shape parameters of a Beta distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaShapeParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaShapeParams {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        let shape = Self { alpha, beta };
        shape.check()?;
        Ok(shape)
    }

    /// Both parameters must be strictly positive.
    pub fn check(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha.is_finite()) {
            return Err(PertError::domain("alpha", self.alpha));
        }
        if !(self.beta > 0.0 && self.beta.is_finite()) {
            return Err(PertError::domain("beta", self.beta));
        }
        Ok(())
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.alpha > 0.0 && self.beta > 0.0
    }
}

/// The interval `[a, b]` outside of which the density vanishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Support {
    pub a: f64,
    pub b: f64,
}

impl Support {
    pub fn new(a: f64, b: f64) -> Result<Self> {
        let support = Self { a, b };
        support.check()?;
        Ok(support)
    }

    pub fn check(&self) -> Result<()> {
        if !self.a.is_finite() {
            return Err(PertError::domain("lower bound", self.a));
        }
        if !self.b.is_finite() {
            return Err(PertError::domain("upper bound", self.b));
        }
        if self.a == self.b {
            return Err(PertError::DegenerateSupport {
                a: self.a,
                b: self.b,
            });
        }
        if self.a > self.b {
            return Err(PertError::domain("upper bound", self.b));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    pub fn contains(&self, x: f64) -> bool {
        self.a <= x && x <= self.b
    }

    /// Maps a point of the unit interval onto `[a, b]`.
    pub fn scale(&self, r: f64) -> f64 {
        self.a + r * self.width()
    }
}

/// How the shape of a distribution is specified: either directly, or
/// through the nominal value of a three-point estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeInput {
    Explicit(BetaShapeParams),
    FromNominal(f64),
}
