//! Trace log formatting shared by every step.
//!
//! The trace is the human-readable record of a run, kept in
//! `WorkflowState::agent_logs`. It is separate from `tracing` output.

pub const PREDICTION_AGENT: &str = "Prediction Agent";
pub const ROUTING_AGENT: &str = "Routing Agent";
pub const OUTREACH_AGENT: &str = "Outreach Agent";
pub const ORCHESTRATOR: &str = "Orchestrator";

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// `[Agent Name] message`
pub fn agent_log(agent: &str, message: impl AsRef<str>) -> String {
    format!("[{}] {}", agent, message.as_ref())
}

/// Per-event banner. `position` is 1-based.
pub fn event_banner(position: usize, total: usize, event_name: &str) -> String {
    let rule = rule();
    format!(
        "\n{rule}\nProcessing Event {position}/{total}: {event_name}\n{rule}"
    )
}
