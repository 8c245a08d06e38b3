use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::DistributionEvaluation;

pub const PAGE_TITLE: &str = "Binomial Distribution";

/// Plain-text renderings of the formulas shown above the controls.
pub const FORMULA_LINES: [&str; 2] = [
    "P(Y=y) = nCy p^y q^(n-y),  y = 0, 1, ..., n",
    "E[Y] = np,  V[Y] = npq,  G(s) = E[s^Y] = (ps + q)^n",
];

/// The two text lines reporting the computed moments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentSummary {
    pub mean_line: String,
    pub variance_line: String,
}

impl MomentSummary {
    #[must_use]
    pub fn from_evaluation(evaluation: &DistributionEvaluation, precision: u32) -> Self {
        Self {
            mean_line: format!("E[Y]={}", format_moment(evaluation.mean, precision)),
            variance_line: format!("V[Y]={}", format_moment(evaluation.variance, precision)),
        }
    }

    #[must_use]
    pub fn lines(&self) -> [&str; 2] {
        [&self.mean_line, &self.variance_line]
    }
}

/// Formats a moment rounded to `precision` decimals without float noise.
///
/// Integral values keep one decimal (`2.0`), so `1.2000000000000002` prints
/// as `1.2` and `40` as `40.0`.
#[must_use]
pub fn format_moment(value: f64, precision: u32) -> String {
    let Some(decimal) = Decimal::from_f64(value) else {
        return format!("{value}");
    };
    let text = decimal.round_dp(precision).normalize().to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
