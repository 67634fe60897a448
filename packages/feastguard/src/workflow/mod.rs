//! Workflow orchestration engine.
//!
//! `state` holds the shared record and merge rules, `machine` the pure
//! transition decisions, `orchestrator` the loop tying them to the domain
//! step handlers.

pub mod error;
pub mod export;
pub mod machine;
pub mod orchestrator;
pub mod state;
pub mod steps;
pub mod trace;

pub use error::WorkflowError;
pub use export::ResultsExport;
pub use machine::{
    should_continue, should_route, ContinueDecision, RouteDecision, Step, WorkflowMachine,
};
pub use orchestrator::{step_budget, Orchestrator, MIN_STEP_BUDGET_MULTIPLIER};
pub use state::{
    merge_policy, MergePolicy, StateField, StateUpdate, WorkflowState, WorkflowStatus,
    MERGE_POLICIES,
};
pub use steps::{skip_step, summary_step, WorkflowSummary};
