use serde::{Deserialize, Serialize};

use crate::core::{EvaluatorConfig, QuantileBounds, Viewport};
use crate::error::{ExplorerError, ExplorerResult};
use crate::interaction::ControlDefaults;

use super::figure::FigureLayout;

/// Session bootstrap configuration.
///
/// Every field has a serde default so partial JSON documents load cleanly and
/// hosts can persist only what they override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub quantiles: QuantileBounds,
    #[serde(default = "default_continuous_sample_count")]
    pub continuous_sample_count: usize,
    #[serde(default = "default_continuity_correction")]
    pub continuity_correction: f64,
    #[serde(default)]
    pub controls: ControlDefaults,
    #[serde(default)]
    pub layout: FigureLayout,
    #[serde(default = "default_summary_precision")]
    pub summary_precision: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            quantiles: QuantileBounds::default(),
            continuous_sample_count: default_continuous_sample_count(),
            continuity_correction: default_continuity_correction(),
            controls: ControlDefaults::default(),
            layout: FigureLayout::default(),
            summary_precision: default_summary_precision(),
        }
    }
}

impl ExplorerConfig {
    /// Sets the percentile cutoffs bounding both supports.
    #[must_use]
    pub fn with_quantiles(mut self, quantiles: QuantileBounds) -> Self {
        self.quantiles = quantiles;
        self
    }

    /// Sets how many points the normal curves are sampled at.
    #[must_use]
    pub fn with_continuous_sample_count(mut self, count: usize) -> Self {
        self.continuous_sample_count = count;
        self
    }

    #[must_use]
    pub fn with_continuity_correction(mut self, correction: f64) -> Self {
        self.continuity_correction = correction;
        self
    }

    #[must_use]
    pub fn with_controls(mut self, controls: ControlDefaults) -> Self {
        self.controls = controls;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: FigureLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_summary_precision(mut self, precision: u32) -> Self {
        self.summary_precision = precision;
        self
    }

    #[must_use]
    pub fn evaluator(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            quantiles: self.quantiles,
            continuous_sample_count: self.continuous_sample_count,
            continuity_correction: self.continuity_correction,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.layout.width_px, self.layout.height_px)
    }

    pub fn validate(&self) -> ExplorerResult<()> {
        self.evaluator().validate()?;
        self.controls.validate()?;
        self.layout.validate()?;
        if self.summary_precision > 28 {
            return Err(ExplorerError::InvalidConfig(format!(
                "summary precision must be <= 28, got {}",
                self.summary_precision
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(input: &str) -> ExplorerResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ExplorerError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ExplorerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ExplorerError::InvalidConfig(format!("failed to serialize config json: {e}"))
        })
    }
}

fn default_continuous_sample_count() -> usize {
    100
}

fn default_continuity_correction() -> f64 {
    0.5
}

fn default_summary_precision() -> u32 {
    6
}
