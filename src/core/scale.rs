use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};

/// Affine map from a data domain onto a pixel range.
///
/// The pixel range may be reversed (`range_start > range_end`), which is how
/// vertical axes put larger values nearer the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ExplorerResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ExplorerError::InvalidData(format!(
                "scale domain must be finite and non-zero, got [{domain_start}, {domain_end}]"
            )));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ExplorerError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn to_pixel(self, value: f64) -> ExplorerResult<f64> {
        if !value.is_finite() {
            return Err(ExplorerError::InvalidData(format!(
                "cannot project non-finite value {value}"
            )));
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn to_domain(self, pixel: f64) -> ExplorerResult<f64> {
        if !pixel.is_finite() {
            return Err(ExplorerError::InvalidData("pixel must be finite".to_owned()));
        }
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Err(ExplorerError::InvalidData(
                "cannot invert a scale with an empty pixel range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (low, high) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        (low..=high).contains(&value)
    }
}
