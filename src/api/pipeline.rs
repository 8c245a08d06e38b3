use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DistributionEvaluation, evaluate};
use crate::error::ExplorerResult;
use crate::interaction::ControlSnapshot;

use super::composer::compose_figure;
use super::config::ExplorerConfig;
use super::figure::Figure;
use super::summary::MomentSummary;

/// Everything one pass produces for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub snapshot: ControlSnapshot,
    pub evaluation: DistributionEvaluation,
    pub figure: Figure,
    pub summary: MomentSummary,
}

/// Evaluator -> composer -> summary for one immutable snapshot.
///
/// Holds no state between calls, so identical snapshots and configs yield
/// identical outputs.
pub fn run_pipeline(
    snapshot: ControlSnapshot,
    config: &ExplorerConfig,
) -> ExplorerResult<PipelineOutput> {
    let params = snapshot.params();
    let evaluation = evaluate(params, &config.evaluator())?;
    let figure = compose_figure(&evaluation, snapshot.cursor(), config.layout)?;
    let summary = MomentSummary::from_evaluation(&evaluation, config.summary_precision);

    debug!(
        trials = params.trials(),
        probability = params.probability(),
        cursor = snapshot.cursor(),
        series = figure.series_count(),
        "pipeline pass complete"
    );

    Ok(PipelineOutput {
        snapshot,
        evaluation,
        figure,
        summary,
    })
}
