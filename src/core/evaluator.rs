use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, Continuous, ContinuousCDF, Discrete, DiscreteCDF, Normal};
use tracing::{debug, trace};

#[cfg(feature = "parallel-evaluation")]
use rayon::prelude::*;

use crate::core::params::DistributionParams;
use crate::core::support::{QuantileBounds, continuous_support, discrete_support};
use crate::error::{ExplorerError, ExplorerResult};

/// Below this many points the pointwise pass stays sequential even when the
/// `parallel-evaluation` feature is on.
#[cfg(feature = "parallel-evaluation")]
const PARALLEL_MIN_POINTS: usize = 4_096;

/// Tunables for one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    pub quantiles: QuantileBounds,
    pub continuous_sample_count: usize,
    pub continuity_correction: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            quantiles: QuantileBounds::default(),
            continuous_sample_count: 100,
            continuity_correction: 0.5,
        }
    }
}

impl EvaluatorConfig {
    pub fn validate(self) -> ExplorerResult<()> {
        self.quantiles.validate()?;
        if self.continuous_sample_count < 2 {
            return Err(ExplorerError::InvalidConfig(format!(
                "continuous sample count must be >= 2, got {}",
                self.continuous_sample_count
            )));
        }
        if !self.continuity_correction.is_finite() {
            return Err(ExplorerError::InvalidConfig(
                "continuity correction must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Binomial PMF/CDF at one integer outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscreteSample {
    pub x: u64,
    pub pmf: f64,
    pub cdf: f64,
}

/// Normal PDF/CDF at one point of the continuous support.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousSample {
    pub x: f64,
    pub pdf: f64,
    pub cdf: f64,
    /// Normal CDF evaluated at `x + continuity_correction`.
    pub corrected_cdf: f64,
}

/// Result of evaluating the binomial and its matched normal for one `(n, p)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEvaluation {
    pub params: DistributionParams,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub continuity_correction: f64,
    pub discrete: Vec<DiscreteSample>,
    pub continuous: Vec<ContinuousSample>,
}

impl DistributionEvaluation {
    /// Normal approximation density at an arbitrary point.
    ///
    /// Used for the height of the cursor reference segment.
    pub fn normal_pdf_at(&self, x: f64) -> ExplorerResult<f64> {
        Ok(matched_normal(self.mean, self.std_dev)?.pdf(x))
    }

    pub fn normal_cdf_at(&self, x: f64) -> ExplorerResult<f64> {
        Ok(matched_normal(self.mean, self.std_dev)?.cdf(x))
    }

    /// Smallest and largest x across both supports.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let discrete = self.discrete.iter().map(|sample| sample.x as f64);
        let continuous = self.continuous.iter().map(|sample| sample.x);
        discrete.chain(continuous).fold(None, |extent, x| match extent {
            None => Some((x, x)),
            Some((min, max)) => Some((min.min(x), max.max(x))),
        })
    }
}

/// Evaluates PMF/CDF over the discrete support and PDF/CDF/corrected CDF over
/// the continuous support. Pure and deterministic in `(params, config)`.
pub fn evaluate(
    params: DistributionParams,
    config: &EvaluatorConfig,
) -> ExplorerResult<DistributionEvaluation> {
    config.validate()?;

    let trials = params.trials();
    let binomial = Binomial::new(params.probability(), trials)
        .map_err(|err| ExplorerError::Distribution(format!("binomial(n={trials}): {err}")))?;
    let mean = params.mean();
    let variance = params.variance();
    let std_dev = params.std_dev();
    let normal = matched_normal(mean, std_dev)?;

    let outcomes = discrete_support(&binomial, trials, config.quantiles);
    let xs = continuous_support(&normal, config.quantiles, config.continuous_sample_count)?;
    trace!(
        trials,
        probability = params.probability(),
        discrete_points = outcomes.len(),
        continuous_points = xs.len(),
        "resolved supports"
    );

    let discrete = evaluate_discrete(&binomial, &outcomes);
    let continuous = evaluate_continuous(&normal, &xs, config.continuity_correction);

    debug!(
        trials,
        probability = params.probability(),
        mean,
        variance,
        "evaluated binomial distribution"
    );

    Ok(DistributionEvaluation {
        params,
        mean,
        variance,
        std_dev,
        continuity_correction: config.continuity_correction,
        discrete,
        continuous,
    })
}

fn matched_normal(mean: f64, std_dev: f64) -> ExplorerResult<Normal> {
    Normal::new(mean, std_dev).map_err(|err| {
        ExplorerError::Distribution(format!("normal(mean={mean}, sd={std_dev}): {err}"))
    })
}

fn discrete_sample(binomial: &Binomial, x: u64) -> DiscreteSample {
    DiscreteSample {
        x,
        pmf: binomial.pmf(x),
        cdf: binomial.cdf(x),
    }
}

fn continuous_sample(normal: &Normal, x: f64, correction: f64) -> ContinuousSample {
    ContinuousSample {
        x,
        pdf: normal.pdf(x),
        cdf: normal.cdf(x),
        corrected_cdf: normal.cdf(x + correction),
    }
}

#[cfg(not(feature = "parallel-evaluation"))]
fn evaluate_discrete(binomial: &Binomial, outcomes: &[u64]) -> Vec<DiscreteSample> {
    outcomes
        .iter()
        .map(|&x| discrete_sample(binomial, x))
        .collect()
}

#[cfg(feature = "parallel-evaluation")]
fn evaluate_discrete(binomial: &Binomial, outcomes: &[u64]) -> Vec<DiscreteSample> {
    if outcomes.len() < PARALLEL_MIN_POINTS {
        return outcomes
            .iter()
            .map(|&x| discrete_sample(binomial, x))
            .collect();
    }
    outcomes
        .par_iter()
        .map(|&x| discrete_sample(binomial, x))
        .collect()
}

#[cfg(not(feature = "parallel-evaluation"))]
fn evaluate_continuous(normal: &Normal, xs: &[f64], correction: f64) -> Vec<ContinuousSample> {
    xs.iter()
        .map(|&x| continuous_sample(normal, x, correction))
        .collect()
}

#[cfg(feature = "parallel-evaluation")]
fn evaluate_continuous(normal: &Normal, xs: &[f64], correction: f64) -> Vec<ContinuousSample> {
    if xs.len() < PARALLEL_MIN_POINTS {
        return xs
            .iter()
            .map(|&x| continuous_sample(normal, x, correction))
            .collect();
    }
    xs.par_iter()
        .map(|&x| continuous_sample(normal, x, correction))
        .collect()
}
