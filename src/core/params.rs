use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};

/// Smallest accepted trial count.
pub const MIN_TRIALS: u64 = 1;
/// Lower bound of the accepted success probability.
pub const MIN_PROBABILITY: f64 = 0.01;
/// Upper bound of the accepted success probability.
pub const MAX_PROBABILITY: f64 = 0.99;

/// Validated binomial parameters `(n, p)`.
///
/// Invariants:
/// - `n >= 1`
/// - `0.01 <= p <= 0.99`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    trials: u64,
    probability: f64,
}

impl DistributionParams {
    /// Builds parameters, rejecting anything outside the invariant.
    pub fn new(trials: u64, probability: f64) -> ExplorerResult<Self> {
        if trials < MIN_TRIALS {
            return Err(ExplorerError::InvalidParameters(format!(
                "trial count must be >= {MIN_TRIALS}, got {trials}"
            )));
        }
        if !probability.is_finite() || !(MIN_PROBABILITY..=MAX_PROBABILITY).contains(&probability)
        {
            return Err(ExplorerError::InvalidParameters(format!(
                "success probability must be in [{MIN_PROBABILITY}, {MAX_PROBABILITY}], got {probability}"
            )));
        }
        Ok(Self {
            trials,
            probability,
        })
    }

    /// Builds parameters by clamping both inputs into range.
    ///
    /// A non-finite probability falls back to the lower bound.
    #[must_use]
    pub fn clamped(trials: u64, probability: f64) -> Self {
        Self {
            trials: clamp_trials(trials),
            probability: clamp_probability(probability).unwrap_or(MIN_PROBABILITY),
        }
    }

    #[must_use]
    pub fn trials(self) -> u64 {
        self.trials
    }

    #[must_use]
    pub fn probability(self) -> f64 {
        self.probability
    }

    /// Failure probability `q = 1 - p`.
    #[must_use]
    pub fn failure_probability(self) -> f64 {
        1.0 - self.probability
    }

    /// Binomial mean `n * p`.
    #[must_use]
    pub fn mean(self) -> f64 {
        self.trials as f64 * self.probability
    }

    /// Binomial variance `n * p * (1 - p)`.
    #[must_use]
    pub fn variance(self) -> f64 {
        self.trials as f64 * self.probability * (1.0 - self.probability)
    }

    /// Standard deviation of the matched normal approximation.
    #[must_use]
    pub fn std_dev(self) -> f64 {
        self.variance().sqrt()
    }

    /// Probability generating function `G(s) = (p*s + q)^n`.
    #[must_use]
    pub fn generating_function(self, s: f64) -> f64 {
        let base = self.probability * s + self.failure_probability();
        match i32::try_from(self.trials) {
            Ok(exponent) => base.powi(exponent),
            Err(_) => base.powf(self.trials as f64),
        }
    }
}

#[must_use]
pub fn clamp_trials(trials: u64) -> u64 {
    trials.max(MIN_TRIALS)
}

/// Clamps into `[0.01, 0.99]`; returns `None` for NaN/infinite input.
#[must_use]
pub fn clamp_probability(probability: f64) -> Option<f64> {
    if !probability.is_finite() {
        return None;
    }
    Some(probability.clamp(MIN_PROBABILITY, MAX_PROBABILITY))
}

#[cfg(test)]
mod tests {
    use super::{DistributionParams, clamp_probability};

    #[test]
    fn strict_constructor_rejects_out_of_range_inputs() {
        assert!(DistributionParams::new(0, 0.4).is_err());
        assert!(DistributionParams::new(5, 0.0).is_err());
        assert!(DistributionParams::new(5, 0.995).is_err());
        assert!(DistributionParams::new(5, f64::NAN).is_err());
        assert!(DistributionParams::new(1, 0.01).is_ok());
        assert!(DistributionParams::new(1, 0.99).is_ok());
    }

    #[test]
    fn clamped_constructor_pulls_values_into_range() {
        let params = DistributionParams::clamped(0, 1.5);
        assert_eq!(params.trials(), 1);
        assert_eq!(params.probability(), 0.99);
        assert_eq!(clamp_probability(f64::INFINITY), None);
    }

    #[test]
    fn generating_function_is_one_at_unit_argument() {
        let params = DistributionParams::new(12, 0.3).expect("params");
        assert!((params.generating_function(1.0) - 1.0).abs() <= 1e-12);
        // G(0) = P(Y = 0) = q^n
        assert!((params.generating_function(0.0) - 0.7f64.powi(12)).abs() <= 1e-15);
    }
}
