//// # Errors
////
//// All the fallible operations of the numerical core report one of these.
//// Boundary blow-ups of the density are not errors: they are replaced
//// by a finite sentinel, see [`crate::kernel::DEFAULT_INFINITE`].

/// Errors raised by the PERT-Beta computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PertError {
    /// An input lies outside the range where the computation is defined,
    /// e.g. a CDF argument outside the support or a non-positive shape.
    #[error("{what} out of domain: {value}")]
    Domain { what: &'static str, value: f64 },

    /// The support `[a, b]` has zero width.
    #[error("degenerate support [{a}, {b}]: bounds must differ")]
    DegenerateSupport { a: f64, b: f64 },

    /// The three-point estimate violates `optimistic <= nominal <= pessimistic`.
    #[error("invalid estimate {optimistic}/{nominal}/{pessimistic}: expected optimistic <= nominal <= pessimistic")]
    InvalidEstimate {
        optimistic: f64,
        nominal: f64,
        pessimistic: f64,
    },
}

impl PertError {
    pub(crate) fn domain(what: &'static str, value: f64) -> Self {
        Self::Domain { what, value }
    }

    /// True for every error that means "input outside the valid range".
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. } | Self::InvalidEstimate { .. })
    }
}

pub type Result<T> = std::result::Result<T, PertError>;
