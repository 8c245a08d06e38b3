//! Input controls for the explorer and the immutable snapshots they produce.
//!
//! Controls never surface validation errors: out-of-range input is clamped the
//! way a bounded numeric widget would clamp it.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::params::{clamp_probability, clamp_trials};
use crate::core::{DistributionParams, MAX_PROBABILITY, MIN_PROBABILITY, MIN_TRIALS};
use crate::error::{ExplorerError, ExplorerResult};

/// Initial control values and the cursor slider granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlDefaults {
    #[serde(default = "default_trials")]
    pub trials: u64,
    #[serde(default = "default_probability")]
    pub probability: f64,
    #[serde(default = "default_cursor_step")]
    pub cursor_step: f64,
}

impl Default for ControlDefaults {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            probability: default_probability(),
            cursor_step: default_cursor_step(),
        }
    }
}

impl ControlDefaults {
    pub fn validate(self) -> ExplorerResult<()> {
        if self.trials < MIN_TRIALS {
            return Err(ExplorerError::InvalidConfig(format!(
                "default trial count must be >= {MIN_TRIALS}"
            )));
        }
        if !(MIN_PROBABILITY..=MAX_PROBABILITY).contains(&self.probability) {
            return Err(ExplorerError::InvalidConfig(format!(
                "default probability must be in [{MIN_PROBABILITY}, {MAX_PROBABILITY}]"
            )));
        }
        if !self.cursor_step.is_finite() || self.cursor_step <= 0.0 {
            return Err(ExplorerError::InvalidConfig(
                "cursor step must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_trials() -> u64 {
    5
}

fn default_probability() -> f64 {
    0.4
}

fn default_cursor_step() -> f64 {
    0.1
}

/// One user action against the controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    SetTrials(u64),
    SetProbability(f64),
    SetCursor(f64),
    /// Restores every control to its configured default.
    Reset,
}

/// What an applied event did to the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlChange {
    Unchanged,
    CursorMoved,
    /// `n` or `p` changed; the cursor slider was regenerated.
    ParamsChanged,
}

/// Continuous slider over `[min, max]` snapped to `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl CursorSlider {
    /// Slider spanning `[0, n]` with its value at the binomial mean.
    #[must_use]
    pub fn for_params(params: DistributionParams, step: f64) -> Self {
        let max = params.trials() as f64;
        Self {
            min: 0.0,
            max,
            step,
            value: params.mean().clamp(0.0, max),
        }
    }

    /// Clamps and snaps `raw`; non-finite input leaves the value untouched.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set(&mut self, raw: f64) -> bool {
        if !raw.is_finite() {
            return false;
        }
        let snapped = snap_to_step(raw, self.step).clamp(self.min, self.max);
        if snapped == self.value {
            return false;
        }
        self.value = snapped;
        true
    }
}

fn snap_to_step(value: f64, step: f64) -> f64 {
    let snapped = (value / step).round() * step;
    let factor = 10f64.powi(step_decimals(step));
    (snapped * factor).round() / factor
}

/// Decimal places needed to write `step` exactly (capped at 12).
fn step_decimals(step: f64) -> i32 {
    (0..12)
        .find(|&decimals| {
            let scaled = step * 10f64.powi(decimals);
            (scaled - scaled.round()).abs() <= 1e-9
        })
        .unwrap_or(12)
}

/// Immutable view of every control, the sole input of one pipeline pass.
///
/// Floats are wrapped so snapshots compare and hash exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlSnapshot {
    pub trials: u64,
    pub probability: OrderedFloat<f64>,
    pub cursor: OrderedFloat<f64>,
}

impl ControlSnapshot {
    /// Builds a snapshot from raw values, clamping like the controls do.
    #[must_use]
    pub fn clamped(trials: u64, probability: f64, cursor: f64) -> Self {
        let params = DistributionParams::clamped(trials, probability);
        let max = params.trials() as f64;
        let cursor = if cursor.is_finite() {
            cursor.clamp(0.0, max)
        } else {
            params.mean()
        };
        Self {
            trials: params.trials(),
            probability: OrderedFloat(params.probability()),
            cursor: OrderedFloat(cursor),
        }
    }

    /// Snapshot with the cursor at its default, the binomial mean.
    #[must_use]
    pub fn at_mean(trials: u64, probability: f64) -> Self {
        let params = DistributionParams::clamped(trials, probability);
        Self::clamped(params.trials(), params.probability(), params.mean())
    }

    #[must_use]
    pub fn params(self) -> DistributionParams {
        DistributionParams::clamped(self.trials, self.probability.into_inner())
    }

    #[must_use]
    pub fn cursor(self) -> f64 {
        self.cursor.into_inner()
    }
}

/// Live control values for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    defaults: ControlDefaults,
    trials: u64,
    probability: f64,
    cursor: CursorSlider,
}

impl ControlState {
    pub fn new(defaults: ControlDefaults) -> ExplorerResult<Self> {
        defaults.validate()?;
        let params = DistributionParams::new(defaults.trials, defaults.probability)?;
        Ok(Self {
            defaults,
            trials: params.trials(),
            probability: params.probability(),
            cursor: CursorSlider::for_params(params, defaults.cursor_step),
        })
    }

    #[must_use]
    pub fn defaults(&self) -> ControlDefaults {
        self.defaults
    }

    #[must_use]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    #[must_use]
    pub fn cursor(&self) -> CursorSlider {
        self.cursor
    }

    #[must_use]
    pub fn params(&self) -> DistributionParams {
        DistributionParams::clamped(self.trials, self.probability)
    }

    #[must_use]
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            trials: self.trials,
            probability: OrderedFloat(self.probability),
            cursor: OrderedFloat(self.cursor.value),
        }
    }

    pub fn apply(&mut self, event: InputEvent) -> ControlChange {
        let change = match event {
            InputEvent::SetTrials(raw) => {
                let trials = clamp_trials(raw);
                if trials == self.trials {
                    ControlChange::Unchanged
                } else {
                    self.trials = trials;
                    self.regenerate_cursor();
                    ControlChange::ParamsChanged
                }
            }
            InputEvent::SetProbability(raw) => match clamp_probability(raw) {
                Some(probability) if probability != self.probability => {
                    self.probability = probability;
                    self.regenerate_cursor();
                    ControlChange::ParamsChanged
                }
                _ => ControlChange::Unchanged,
            },
            InputEvent::SetCursor(raw) => {
                if self.cursor.set(raw) {
                    ControlChange::CursorMoved
                } else {
                    ControlChange::Unchanged
                }
            }
            InputEvent::Reset => {
                let before = self.snapshot();
                self.trials = self.defaults.trials;
                self.probability = self.defaults.probability;
                self.regenerate_cursor();
                if self.snapshot() == before {
                    ControlChange::Unchanged
                } else {
                    ControlChange::ParamsChanged
                }
            }
        };
        trace!(?event, ?change, "applied input event");
        change
    }

    fn regenerate_cursor(&mut self) {
        self.cursor = CursorSlider::for_params(self.params(), self.defaults.cursor_step);
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorSlider, snap_to_step};
    use crate::core::DistributionParams;

    #[test]
    fn snapping_removes_float_noise() {
        assert_eq!(snap_to_step(2.3000000000000003, 0.1), 2.3);
        assert_eq!(snap_to_step(2.26, 0.1), 2.3);
        assert_eq!(snap_to_step(7.2, 0.25), 7.25);
    }

    #[test]
    fn slider_ignores_non_finite_values() {
        let params = DistributionParams::new(5, 0.4).expect("params");
        let mut slider = CursorSlider::for_params(params, 0.1);
        assert!(!slider.set(f64::NAN));
        assert_eq!(slider.value, 2.0);
    }
}
