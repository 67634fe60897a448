//! Orchestrator: drives the workflow machine over the step handlers.
//!
//! Strictly sequential. The orchestrator owns the state, hands each handler a
//! read view, merges the returned update, then asks the machine for the next
//! step. A step budget bounds the run.

use tracing::{debug, error, info, instrument};

use super::error::{Result, WorkflowError};
use super::machine::{Step, WorkflowMachine};
use super::state::{StateUpdate, WorkflowState, WorkflowStatus};
use super::steps::{skip_step, summary_step};
use super::trace::{agent_log, ORCHESTRATOR};
use crate::domains::intake::{Event, Recipient};
use crate::domains::outreach::message_step;
use crate::domains::prediction::predict_step;
use crate::domains::routing::route_step;
use crate::kernel::WorkflowDeps;

/// Smallest allowed steps-per-event multiplier.
pub const MIN_STEP_BUDGET_MULTIPLIER: usize = 4;

/// Steps reserved on top of the per-event allowance.
pub const STEP_BUDGET_BASE: usize = 2;

pub fn step_budget(event_count: usize, multiplier: usize) -> usize {
    multiplier.max(MIN_STEP_BUDGET_MULTIPLIER) * event_count + STEP_BUDGET_BASE
}

pub struct Orchestrator {
    deps: WorkflowDeps,
    machine: WorkflowMachine,
    multiplier: usize,
    budget_override: Option<usize>,
}

impl Orchestrator {
    pub fn new(deps: WorkflowDeps) -> Self {
        Self {
            deps,
            machine: WorkflowMachine::new(),
            multiplier: MIN_STEP_BUDGET_MULTIPLIER,
            budget_override: None,
        }
    }

    /// Steps allowed per event. Values below the minimum are raised to it.
    pub fn with_step_budget_multiplier(mut self, multiplier: usize) -> Self {
        self.multiplier = multiplier.max(MIN_STEP_BUDGET_MULTIPLIER);
        self
    }

    /// Fixed total budget, ignoring event count. Mainly for tests.
    pub fn with_step_budget(mut self, budget: usize) -> Self {
        self.budget_override = Some(budget);
        self
    }

    pub fn budget_for(&self, event_count: usize) -> usize {
        self.budget_override
            .unwrap_or_else(|| step_budget(event_count, self.multiplier))
    }

    /// Run every event through the workflow and return the final state.
    ///
    /// Fails only when the step budget runs out or a step tries to move the
    /// cursor backwards.
    #[instrument(skip_all, fields(events = events.len(), recipients = recipients.len()))]
    pub async fn run(
        &self,
        events: Vec<Event>,
        recipients: Vec<Recipient>,
    ) -> Result<WorkflowState> {
        let mut state = WorkflowState::new(events, recipients);
        let budget = self.budget_for(state.total_events);
        info!(run_id = %state.run_id, budget, "Workflow started");

        let mut next = Some(self.machine.initial_step());
        let mut steps_taken = 0usize;

        while let Some(step) = next {
            if steps_taken >= budget {
                return Err(self.exhausted(state, budget, step));
            }
            steps_taken += 1;

            debug!(
                step = %step,
                cursor = state.current_event_idx,
                steps_taken,
                "Executing step"
            );

            let update = self.execute(step, &state).await;
            if let Err(e) = state.apply(update) {
                let e = e.at_step(step.as_str());
                error!(step = %step, error = %e, "Rejected state update");
                state.workflow_status = WorkflowStatus::Error;
                return Err(e);
            }

            next = self.machine.decide(step, &state);
        }

        info!(
            run_id = %state.run_id,
            steps_taken,
            predictions = state.predictions.len(),
            routes = state.routes.len(),
            messages = state.messages.len(),
            "Workflow completed"
        );
        Ok(state)
    }

    async fn execute(&self, step: Step, state: &WorkflowState) -> StateUpdate {
        match step {
            Step::Predict => predict_step(state, &self.deps).await,
            Step::Route => route_step(state, &self.deps).await,
            Step::Skip => skip_step(state),
            Step::Message => message_step(state, &self.deps).await,
            Step::Summary => summary_step(state),
        }
    }

    fn exhausted(&self, mut state: WorkflowState, budget: usize, step: Step) -> WorkflowError {
        let event_id = state.current_event().map(|e| e.id.clone());
        error!(
            budget,
            step = %step,
            event_id = event_id.as_deref().unwrap_or("none"),
            "Step budget exhausted"
        );

        state.agent_logs.push(agent_log(
            ORCHESTRATOR,
            format!(
                "Step budget of {} exhausted before {} (event: {})",
                budget,
                step,
                event_id.as_deref().unwrap_or("none")
            ),
        ));
        state.workflow_status = WorkflowStatus::Error;

        WorkflowError::StepBudgetExhausted {
            budget,
            step: step.to_string(),
            event_id,
            state: Box::new(state),
        }
    }
}
