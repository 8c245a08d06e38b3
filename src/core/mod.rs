pub mod evaluator;
pub mod params;
pub mod scale;
pub mod support;
pub mod types;

pub use evaluator::{
    ContinuousSample, DiscreteSample, DistributionEvaluation, EvaluatorConfig, evaluate,
};
pub use params::{DistributionParams, MAX_PROBABILITY, MIN_PROBABILITY, MIN_TRIALS};
pub use scale::LinearScale;
pub use support::{QuantileBounds, binomial_quantile, continuous_support, discrete_support};
pub use types::{DataPoint, Viewport};
