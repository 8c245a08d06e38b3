use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};
use crate::interaction::ControlSnapshot;

use super::figure::Figure;
use super::pipeline::PipelineOutput;
use super::summary::MomentSummary;

pub const FIGURE_JSON_SCHEMA_V1: u32 = 1;

/// Versioned export of one pass: the inputs, the two summary lines and the
/// figure with every named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ControlSnapshot,
    pub summary: MomentSummary,
    pub figure: Figure,
}

impl PipelineOutput {
    #[must_use]
    pub fn to_contract_v1(&self) -> FigureJsonContractV1 {
        FigureJsonContractV1 {
            schema_version: FIGURE_JSON_SCHEMA_V1,
            snapshot: self.snapshot,
            summary: self.summary.clone(),
            figure: self.figure.clone(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ExplorerResult<String> {
        serde_json::to_string_pretty(&self.to_contract_v1()).map_err(|e| {
            ExplorerError::InvalidData(format!("failed to serialize figure contract v1: {e}"))
        })
    }
}

impl FigureJsonContractV1 {
    pub fn from_json_str(input: &str) -> ExplorerResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            ExplorerError::InvalidData(format!("failed to parse figure json payload: {e}"))
        })?;
        if payload.schema_version != FIGURE_JSON_SCHEMA_V1 {
            return Err(ExplorerError::InvalidData(format!(
                "unsupported figure schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}
