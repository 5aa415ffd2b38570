pub mod distribution;
pub mod empirical;
pub mod errors;
pub mod gamma;
pub mod integrate;
pub mod kernel;
pub mod load;
pub mod moments;
pub mod report;
pub mod types;

pub use distribution::BetaDistribution;
pub use errors::{PertError, Result};
pub use types::{BetaShapeParams, ShapeInput, Support, ThreePointEstimate};
