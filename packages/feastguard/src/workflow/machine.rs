//! Workflow state machine
//!
//! Pure decisions only: given the step that just ran and the merged state,
//! pick the next step. No IO, no text generation.
//!
//! ```text
//! Predict -> Route | Skip | Summary
//! Route   -> Message
//! Message -> Predict | Summary
//! Skip    -> Predict | Summary
//! Summary -> (terminal)
//! ```

use std::fmt;

use super::state::WorkflowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Predict,
    Route,
    Skip,
    Message,
    Summary,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Predict => "predict",
            Step::Route => "route",
            Step::Skip => "skip",
            Step::Message => "message",
            Step::Summary => "summary",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the decision made after Predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Route,
    Skip,
    Done,
}

/// Outcome of the decision made after Skip or Message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueDecision {
    Continue,
    Done,
}

/// Reads only the cursor and the latest prediction.
pub fn should_route(state: &WorkflowState) -> RouteDecision {
    if state.is_exhausted() {
        return RouteDecision::Done;
    }

    match state.predictions.last() {
        Some(latest) if latest.has_surplus => RouteDecision::Route,
        _ => RouteDecision::Skip,
    }
}

pub fn should_continue(state: &WorkflowState) -> ContinueDecision {
    if state.is_exhausted() {
        ContinueDecision::Done
    } else {
        ContinueDecision::Continue
    }
}

/// Per-run machine. Stateless; the workflow state carries everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowMachine;

impl WorkflowMachine {
    pub fn new() -> Self {
        Self
    }

    pub fn initial_step(&self) -> Step {
        Step::Predict
    }

    /// Next step after `after` has been applied, `None` once Summary ran.
    pub fn decide(&self, after: Step, state: &WorkflowState) -> Option<Step> {
        match after {
            Step::Predict => Some(match should_route(state) {
                RouteDecision::Route => Step::Route,
                RouteDecision::Skip => Step::Skip,
                RouteDecision::Done => Step::Summary,
            }),
            Step::Route => Some(Step::Message),
            Step::Skip | Step::Message => Some(match should_continue(state) {
                ContinueDecision::Continue => Step::Predict,
                ContinueDecision::Done => Step::Summary,
            }),
            Step::Summary => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{FoodCategory, Urgency};
    use crate::domains::intake::Event;
    use crate::domains::prediction::Prediction;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            name: id.to_string(),
            attendees: None,
            catering_type: None,
            duration_hours: None,
            weather: None,
            food_type: vec![],
            location: None,
            date: None,
            status: None,
        }
    }

    fn prediction(id: &str, has_surplus: bool) -> Prediction {
        Prediction {
            event_id: id.to_string(),
            event_name: id.to_string(),
            has_surplus,
            predicted_kg: if has_surplus { 100.0 } else { 0.0 },
            category: if has_surplus {
                FoodCategory::Perishable
            } else {
                FoodCategory::None
            },
            urgency: if has_surplus { Urgency::High } else { Urgency::Low },
            surplus_score: 0.0,
            confidence: 0.6,
            reasoning: String::new(),
        }
    }

    fn state_with(predictions: Vec<Prediction>, cursor: usize) -> WorkflowState {
        let mut state = WorkflowState::new(vec![event("E001"), event("E002")], vec![]);
        state.predictions = predictions;
        state.current_event_idx = cursor;
        state
    }

    #[test]
    fn test_route_when_latest_prediction_has_surplus() {
        let state = state_with(vec![prediction("E001", true)], 0);
        assert_eq!(should_route(&state), RouteDecision::Route);
    }

    #[test]
    fn test_skip_without_surplus_or_prediction() {
        assert_eq!(
            should_route(&state_with(vec![prediction("E001", false)], 0)),
            RouteDecision::Skip
        );
        assert_eq!(should_route(&state_with(vec![], 0)), RouteDecision::Skip);
    }

    #[test]
    fn test_only_tail_prediction_matters() {
        let state = state_with(
            vec![prediction("E001", true), prediction("E002", false)],
            1,
        );
        assert_eq!(should_route(&state), RouteDecision::Skip);
    }

    #[test]
    fn test_done_once_cursor_passes_last_event() {
        let state = state_with(vec![prediction("E002", true)], 2);
        assert_eq!(should_route(&state), RouteDecision::Done);
        assert_eq!(should_continue(&state), ContinueDecision::Done);
        assert_eq!(
            should_continue(&state_with(vec![], 1)),
            ContinueDecision::Continue
        );
    }

    #[test]
    fn test_transitions() {
        let machine = WorkflowMachine::new();
        let running = state_with(vec![prediction("E001", true)], 0);
        let finished = state_with(vec![], 2);

        assert_eq!(machine.initial_step(), Step::Predict);
        assert_eq!(machine.decide(Step::Predict, &running), Some(Step::Route));
        assert_eq!(machine.decide(Step::Route, &running), Some(Step::Message));
        assert_eq!(machine.decide(Step::Message, &running), Some(Step::Predict));
        assert_eq!(machine.decide(Step::Skip, &finished), Some(Step::Summary));
        assert_eq!(
            machine.decide(Step::Predict, &finished),
            Some(Step::Summary)
        );
        assert_eq!(machine.decide(Step::Summary, &finished), None);
    }
}
