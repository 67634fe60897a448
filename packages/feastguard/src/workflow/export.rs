use serde::Serialize;

use super::state::WorkflowState;
use super::steps::WorkflowSummary;
use crate::domains::outreach::OutreachMessage;
use crate::domains::prediction::Prediction;
use crate::domains::routing::Route;

/// What a finished run exports: results, the trace log, and the aggregate
/// summary.
#[derive(Debug, Serialize)]
pub struct ResultsExport<'a> {
    pub run_id: String,
    pub status: String,
    pub predictions: &'a [Prediction],
    pub routes: &'a [Route],
    pub messages: &'a [OutreachMessage],
    pub logs: &'a [String],
    pub summary: WorkflowSummary,
}

impl<'a> ResultsExport<'a> {
    pub fn from_state(state: &'a WorkflowState) -> Self {
        Self {
            run_id: state.run_id.to_string(),
            status: state.workflow_status.to_string(),
            predictions: &state.predictions,
            routes: &state.routes,
            messages: &state.messages,
            logs: &state.agent_logs,
            summary: WorkflowSummary::from_state(state),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
