//! Shared workflow state and the partial updates steps return.
//!
//! Steps never mutate state directly. Each returns a `StateUpdate`, and
//! `WorkflowState::apply` merges it field by field according to
//! `MERGE_POLICIES`: accumulators are appended, everything else overwritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::WorkflowError;
use crate::domains::intake::{Event, Recipient};
use crate::domains::outreach::OutreachMessage;
use crate::domains::prediction::Prediction;
use crate::domains::routing::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Running,
    Completed,
    Error,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStatus::Running => "running",
            WorkflowStatus::Completed => "completed",
            WorkflowStatus::Error => "error",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Merge table
// =============================================================================

/// Every field a `StateUpdate` can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Predictions,
    Routes,
    Messages,
    AgentLogs,
    ProcessedEvents,
    CurrentEventIdx,
    WorkflowStatus,
}

impl StateField {
    pub fn name(&self) -> &'static str {
        match self {
            StateField::Predictions => "predictions",
            StateField::Routes => "routes",
            StateField::Messages => "messages",
            StateField::AgentLogs => "agent_logs",
            StateField::ProcessedEvents => "processed_events",
            StateField::CurrentEventIdx => "current_event_idx",
            StateField::WorkflowStatus => "workflow_status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Extend the existing list
    Append,
    /// Overwrite when the update carries a value
    Replace,
}

pub const MERGE_POLICIES: &[(StateField, MergePolicy)] = &[
    (StateField::Predictions, MergePolicy::Append),
    (StateField::Routes, MergePolicy::Append),
    (StateField::Messages, MergePolicy::Append),
    (StateField::AgentLogs, MergePolicy::Append),
    (StateField::ProcessedEvents, MergePolicy::Append),
    (StateField::CurrentEventIdx, MergePolicy::Replace),
    (StateField::WorkflowStatus, MergePolicy::Replace),
];

pub fn merge_policy(field: StateField) -> MergePolicy {
    MERGE_POLICIES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, policy)| *policy)
        .unwrap_or(MergePolicy::Replace)
}

fn merge_list<T>(field: StateField, target: &mut Vec<T>, incoming: Vec<T>) {
    if incoming.is_empty() {
        return;
    }
    match merge_policy(field) {
        MergePolicy::Append => target.extend(incoming),
        MergePolicy::Replace => *target = incoming,
    }
}

fn merge_value<T>(field: StateField, target: &mut T, incoming: Option<T>) {
    let Some(value) = incoming else { return };
    match merge_policy(field) {
        // A scalar cannot be extended; the latest value wins either way.
        MergePolicy::Append | MergePolicy::Replace => *target = value,
    }
}

// =============================================================================
// StateUpdate
// =============================================================================

/// Partial update returned by a step. Empty lists and `None` leave the
/// corresponding field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub predictions: Vec<Prediction>,
    pub routes: Vec<Route>,
    pub messages: Vec<OutreachMessage>,
    pub agent_logs: Vec<String>,
    pub processed_events: Vec<String>,
    pub current_event_idx: Option<usize>,
    pub workflow_status: Option<WorkflowStatus>,
}

impl StateUpdate {
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
            && self.routes.is_empty()
            && self.messages.is_empty()
            && self.agent_logs.is_empty()
            && self.processed_events.is_empty()
            && self.current_event_idx.is_none()
            && self.workflow_status.is_none()
    }
}

// =============================================================================
// WorkflowState
// =============================================================================

/// The record threaded through every step of a run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub events: Vec<Event>,
    pub recipients: Vec<Recipient>,
    pub predictions: Vec<Prediction>,
    pub routes: Vec<Route>,
    pub messages: Vec<OutreachMessage>,
    pub agent_logs: Vec<String>,
    pub processed_events: Vec<String>,
    /// Index of the event being processed. Only ever increases.
    pub current_event_idx: usize,
    pub workflow_status: WorkflowStatus,
    pub total_events: usize,
}

impl WorkflowState {
    pub fn new(events: Vec<Event>, recipients: Vec<Recipient>) -> Self {
        let total_events = events.len();
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            events,
            recipients,
            predictions: Vec::new(),
            routes: Vec::new(),
            messages: Vec::new(),
            agent_logs: Vec::new(),
            processed_events: Vec::new(),
            current_event_idx: 0,
            workflow_status: WorkflowStatus::Running,
            total_events,
        }
    }

    /// Event at the cursor, `None` once every event has been processed.
    pub fn current_event(&self) -> Option<&Event> {
        self.events.get(self.current_event_idx)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_event_idx >= self.total_events
    }

    /// Merge a step's update. A cursor that would move backwards is rejected
    /// before anything is written.
    pub fn apply(&mut self, update: StateUpdate) -> Result<(), WorkflowError> {
        let StateUpdate {
            predictions,
            routes,
            messages,
            agent_logs,
            processed_events,
            current_event_idx,
            workflow_status,
        } = update;

        if let Some(to) = current_event_idx {
            if to < self.current_event_idx {
                return Err(WorkflowError::CursorRegression {
                    from: self.current_event_idx,
                    to,
                    step: None,
                    event_id: self.current_event().map(|e| e.id.clone()),
                });
            }
        }

        merge_list(StateField::Predictions, &mut self.predictions, predictions);
        merge_list(StateField::Routes, &mut self.routes, routes);
        merge_list(StateField::Messages, &mut self.messages, messages);
        merge_list(StateField::AgentLogs, &mut self.agent_logs, agent_logs);
        merge_list(
            StateField::ProcessedEvents,
            &mut self.processed_events,
            processed_events,
        );
        merge_value(
            StateField::CurrentEventIdx,
            &mut self.current_event_idx,
            current_event_idx,
        );
        merge_value(
            StateField::WorkflowStatus,
            &mut self.workflow_status,
            workflow_status,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorkflowState {
        WorkflowState::new(vec![], vec![])
    }

    #[test]
    fn test_every_field_has_exactly_one_policy() {
        let fields = [
            StateField::Predictions,
            StateField::Routes,
            StateField::Messages,
            StateField::AgentLogs,
            StateField::ProcessedEvents,
            StateField::CurrentEventIdx,
            StateField::WorkflowStatus,
        ];
        for field in fields {
            let count = MERGE_POLICIES.iter().filter(|(f, _)| *f == field).count();
            assert_eq!(count, 1, "{} must appear once", field.name());
        }
        assert_eq!(MERGE_POLICIES.len(), fields.len());
    }

    #[test]
    fn test_accumulators_append() {
        let mut state = state();
        state
            .apply(StateUpdate {
                agent_logs: vec!["first".to_string()],
                processed_events: vec!["E001".to_string()],
                ..Default::default()
            })
            .unwrap();
        state
            .apply(StateUpdate {
                agent_logs: vec!["second".to_string(), "third".to_string()],
                ..Default::default()
            })
            .unwrap();

        assert_eq!(state.agent_logs, vec!["first", "second", "third"]);
        assert_eq!(state.processed_events, vec!["E001"]);
    }

    #[test]
    fn test_scalars_overwrite() {
        let mut state = state();
        state
            .apply(StateUpdate {
                current_event_idx: Some(2),
                workflow_status: Some(WorkflowStatus::Completed),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(state.current_event_idx, 2);
        assert_eq!(state.workflow_status, WorkflowStatus::Completed);

        state.apply(StateUpdate::default()).unwrap();
        assert_eq!(state.current_event_idx, 2);
        assert_eq!(state.workflow_status, WorkflowStatus::Completed);
    }

    #[test]
    fn test_cursor_regression_rejected_without_partial_write() {
        let mut state = state();
        state.current_event_idx = 3;

        let err = state
            .apply(StateUpdate {
                agent_logs: vec!["should not land".to_string()],
                current_event_idx: Some(1),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::CursorRegression { from: 3, to: 1, .. }
        ));
        assert!(state.agent_logs.is_empty());
        assert_eq!(state.current_event_idx, 3);
    }

    #[test]
    fn test_cursor_regression_names_current_event() {
        let events = ["E001", "E002"].map(|id| Event {
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
        });
        let mut state = WorkflowState::new(events.to_vec(), vec![]);
        state.current_event_idx = 1;

        let err = state
            .apply(StateUpdate {
                current_event_idx: Some(0),
                ..Default::default()
            })
            .unwrap_err();

        let WorkflowError::CursorRegression { step, event_id, .. } = err else {
            panic!("expected cursor regression");
        };
        assert_eq!(step, None);
        assert_eq!(event_id.as_deref(), Some("E002"));
    }

    #[test]
    fn test_empty_update() {
        assert!(StateUpdate::default().is_empty());
        assert!(!StateUpdate {
            current_event_idx: Some(0),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&WorkflowStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
