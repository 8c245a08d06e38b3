use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, ContinuousCDF, DiscreteCDF, Normal};

use crate::error::{ExplorerError, ExplorerResult};

/// Percentile cutoffs bounding both plotted supports.
///
/// `lower` maps to the left edge of each support and `upper` to the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for QuantileBounds {
    fn default() -> Self {
        Self {
            lower: 0.01,
            upper: 0.99,
        }
    }
}

impl QuantileBounds {
    pub fn new(lower: f64, upper: f64) -> ExplorerResult<Self> {
        let bounds = Self { lower, upper };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(self) -> ExplorerResult<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ExplorerError::InvalidConfig(
                "quantile bounds must be finite".to_owned(),
            ));
        }
        if self.lower <= 0.0 || self.upper >= 1.0 || self.lower >= self.upper {
            return Err(ExplorerError::InvalidConfig(format!(
                "quantile bounds must satisfy 0 < lower < upper < 1, got lower={}, upper={}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Smallest `k` in `[0, n]` with `cdf(k) >= probability`.
///
/// Binary search keeps this logarithmic in `n`; each probe is one library CDF call.
#[must_use]
pub fn binomial_quantile(distribution: &Binomial, trials: u64, probability: f64) -> u64 {
    let mut low = 0_u64;
    let mut high = trials;
    while low < high {
        let mid = low + (high - low) / 2;
        if distribution.cdf(mid) >= probability {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    low
}

/// Integer sample points between the binomial quantiles, both ends included.
#[must_use]
pub fn discrete_support(distribution: &Binomial, trials: u64, bounds: QuantileBounds) -> Vec<u64> {
    let first = binomial_quantile(distribution, trials, bounds.lower);
    let last = binomial_quantile(distribution, trials, bounds.upper);
    (first..=last).collect()
}

/// `count` evenly spaced points between the normal quantiles, both ends included.
pub fn continuous_support(
    distribution: &Normal,
    bounds: QuantileBounds,
    count: usize,
) -> ExplorerResult<Vec<f64>> {
    let start = distribution.inverse_cdf(bounds.lower);
    let end = distribution.inverse_cdf(bounds.upper);
    if !start.is_finite() || !end.is_finite() {
        return Err(ExplorerError::InvalidData(format!(
            "normal quantiles are not finite: start={start}, end={end}"
        )));
    }
    Ok(linspace(start, end, count))
}

#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{QuantileBounds, binomial_quantile, linspace};
    use statrs::distribution::Binomial;

    #[test]
    fn linspace_hits_both_endpoints() {
        let values = linspace(1.0, 2.0, 5);
        assert_eq!(values, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn quantile_bounds_reject_inverted_or_degenerate_ranges() {
        assert!(QuantileBounds::new(0.5, 0.5).is_err());
        assert!(QuantileBounds::new(0.9, 0.1).is_err());
        assert!(QuantileBounds::new(0.0, 0.9).is_err());
        assert!(QuantileBounds::new(0.05, 0.95).is_ok());
    }

    #[test]
    fn binomial_quantile_finds_smallest_covering_outcome() {
        let binomial = Binomial::new(0.4, 5).expect("binomial");
        // P(Y <= 4) = 1 - 0.4^5 = 0.98976 < 0.99
        assert_eq!(binomial_quantile(&binomial, 5, 0.99), 5);
        assert_eq!(binomial_quantile(&binomial, 5, 0.01), 0);
    }
}
