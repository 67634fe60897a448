// Mock implementations for testing
//
// Provides a scripted reasoner that can be injected into WorkflowDeps.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseReasoner, ReasoningRequest, WorkflowDeps};

// =============================================================================
// Mock Reasoner
// =============================================================================

#[derive(Clone)]
pub struct MockReasoner {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<ReasoningRequest>>>,
    failing: bool,
}

impl MockReasoner {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: false,
        }
    }

    /// A reasoner whose every call fails, as if the provider were down.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Get all requests that were sent
    pub fn calls(&self) -> Vec<ReasoningRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a user prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.user.contains(text))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Wrap this mock into workflow dependencies. The mock stays observable
    /// through its shared call log.
    pub fn into_deps(self) -> WorkflowDeps {
        WorkflowDeps::new(Arc::new(self))
    }
}

impl Default for MockReasoner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseReasoner for MockReasoner {
    async fn reason(&self, request: ReasoningRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request);

        if self.failing {
            anyhow::bail!("mock reasoner unavailable");
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok("Mock reasoning".to_string())
        }
    }
}
