use thiserror::Error;

use super::state::WorkflowState;

/// Fatal orchestration errors. Recoverable failures (text generation,
/// malformed records) never surface here.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The run took more steps than its budget allows. Carries the partial
    /// state, whose status is `error`.
    #[error(
        "step budget of {budget} exhausted before step {step} (event: {})",
        .event_id.as_deref().unwrap_or("none")
    )]
    StepBudgetExhausted {
        budget: usize,
        step: String,
        event_id: Option<String>,
        state: Box<WorkflowState>,
    },

    /// A step update tried to move the cursor backwards. `step` is filled in
    /// by whoever knows which step produced the update.
    #[error(
        "cursor may not move backwards (from {from} to {to}, step: {}, event: {})",
        .step.as_deref().unwrap_or("unknown"),
        .event_id.as_deref().unwrap_or("none")
    )]
    CursorRegression {
        from: usize,
        to: usize,
        step: Option<String>,
        event_id: Option<String>,
    },
}

impl WorkflowError {
    /// Partial state at the point of failure, when the error carries one.
    pub fn partial_state(&self) -> Option<&WorkflowState> {
        match self {
            WorkflowError::StepBudgetExhausted { state, .. } => Some(state.as_ref()),
            WorkflowError::CursorRegression { .. } => None,
        }
    }

    /// Attach the name of the step that produced a rejected update.
    pub fn at_step(self, name: impl Into<String>) -> Self {
        match self {
            WorkflowError::CursorRegression {
                from,
                to,
                event_id,
                ..
            } => WorkflowError::CursorRegression {
                from,
                to,
                step: Some(name.into()),
                event_id,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
