//! Orchestrator-owned steps: Skip and Summary.

use serde::Serialize;
use tracing::{debug, info};

use super::state::{StateUpdate, WorkflowState, WorkflowStatus};
use super::trace::rule;
use crate::common::FoodCategory;

pub const SKIP_MESSAGE: &str = "No surplus detected - moving to next event";

/// Trace the skip and advance the cursor by one.
pub fn skip_step(state: &WorkflowState) -> StateUpdate {
    debug!(
        cursor = state.current_event_idx,
        "Skipping event without surplus"
    );
    StateUpdate {
        agent_logs: vec![SKIP_MESSAGE.to_string()],
        current_event_idx: Some(state.current_event_idx + 1),
        ..StateUpdate::default()
    }
}

/// Aggregate figures for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkflowSummary {
    pub total_predictions: usize,
    pub surplus_events: usize,
    pub successful_routes: usize,
    pub total_kg_rescued: f64,
    pub perishable_routes: usize,
    pub non_perishable_routes: usize,
    pub messages_generated: usize,
}

impl WorkflowSummary {
    pub fn from_state(state: &WorkflowState) -> Self {
        let matched = || state.routes.iter().filter(|r| r.is_match());
        let matched_in = |category: FoodCategory| {
            matched().filter(|r| r.food_category == category).count()
        };

        Self {
            total_predictions: state.predictions.len(),
            surplus_events: state.predictions.iter().filter(|p| p.has_surplus).count(),
            successful_routes: matched().count(),
            total_kg_rescued: matched().map(|r| r.volume_kg).sum(),
            perishable_routes: matched_in(FoodCategory::Perishable),
            non_perishable_routes: matched_in(FoodCategory::NonPerishable),
            messages_generated: state.messages.len(),
        }
    }

    pub fn format_block(&self) -> String {
        let rule = rule();
        format!(
            "\n{rule}
WORKFLOW SUMMARY
{rule}
Events Processed: {}
Events with Surplus: {}
Successful Routes: {}
Total Food Rescued: {:.0}kg

Food Categories:
  - Perishable: {} routes
  - Non-perishable: {} routes

Messages Generated: {}
{rule}\n",
            self.total_predictions,
            self.surplus_events,
            self.successful_routes,
            self.total_kg_rescued,
            self.perishable_routes,
            self.non_perishable_routes,
            self.messages_generated,
        )
    }
}

/// Terminal step. Appends the summary block and marks the run completed.
///
/// A state that is already completed gets nothing appended, so running the
/// step twice leaves the state as it was after the first run.
pub fn summary_step(state: &WorkflowState) -> StateUpdate {
    if state.workflow_status == WorkflowStatus::Completed {
        return StateUpdate::default();
    }

    let summary = WorkflowSummary::from_state(state);
    info!(
        run_id = %state.run_id,
        predictions = summary.total_predictions,
        routes = summary.successful_routes,
        kg_rescued = summary.total_kg_rescued,
        messages = summary.messages_generated,
        "Workflow summary"
    );

    StateUpdate {
        agent_logs: vec![summary.format_block()],
        workflow_status: Some(WorkflowStatus::Completed),
        ..StateUpdate::default()
    }
}
