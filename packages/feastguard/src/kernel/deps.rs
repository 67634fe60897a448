//! Workflow dependencies for step handlers (using traits for testability)
//!
//! The orchestrator hands a `WorkflowDeps` to every step. External services
//! sit behind trait objects so tests can inject deterministic stubs.

use ai_client::ChatClient;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::kernel::{BaseReasoner, ReasoningRequest};

// =============================================================================
// ChatClient Adapter (implements BaseReasoner trait)
// =============================================================================

/// Wrapper around `ChatClient` that implements `BaseReasoner`
pub struct ChatReasoner(pub Arc<ChatClient>);

impl ChatReasoner {
    pub fn new(client: Arc<ChatClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseReasoner for ChatReasoner {
    async fn reason(&self, request: ReasoningRequest) -> Result<String> {
        self.0
            .chat_with_system(&request.system, &request.user, request.temperature)
            .await
            .map_err(anyhow::Error::from)
    }
}

// =============================================================================
// Offline Reasoner
// =============================================================================

/// Used when no API key is configured. Every call fails, so every step takes
/// its template fallback.
pub struct OfflineReasoner;

#[async_trait]
impl BaseReasoner for OfflineReasoner {
    async fn reason(&self, _request: ReasoningRequest) -> Result<String> {
        anyhow::bail!("text generation disabled (no API key configured)")
    }
}

// =============================================================================
// WorkflowDeps
// =============================================================================

/// Dependencies accessible to step handlers
#[derive(Clone)]
pub struct WorkflowDeps {
    pub reasoner: Arc<dyn BaseReasoner>,
}

impl WorkflowDeps {
    pub fn new(reasoner: Arc<dyn BaseReasoner>) -> Self {
        Self { reasoner }
    }

    /// Build dependencies from configuration.
    ///
    /// Without an API key (or with `offline` set) the offline reasoner is used.
    pub fn from_config(config: &Config, offline: bool) -> Self {
        match (&config.openrouter_api_key, offline) {
            (Some(api_key), false) => {
                info!(
                    model = %config.model,
                    endpoint = %config.endpoint,
                    "Using chat reasoner"
                );
                let client = ChatClient::new(api_key.clone())
                    .with_base_url(config.endpoint.clone())
                    .with_model(config.model.clone())
                    .with_timeout(config.request_timeout);
                Self::new(Arc::new(ChatReasoner::new(Arc::new(client))))
            }
            _ => {
                info!("No text generation configured, using template fallbacks");
                Self::new(Arc::new(OfflineReasoner))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_client::AiError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_offline_reasoner_always_fails() {
        let result = OfflineReasoner
            .reason(ReasoningRequest::new("system", "user", 0.7))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_chat_reasoner_keeps_client_error() {
        // Nothing listens on the discard port, so both attempts are refused
        let client = ChatClient::new("test-key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let reasoner = ChatReasoner::new(Arc::new(client));

        let err = reasoner
            .reason(ReasoningRequest::new("system", "user", 0.7))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AiError>(),
            Some(AiError::Network(_) | AiError::Timeout(_))
        ));
    }

    #[test]
    fn test_base_reasoner_object_safe() {
        fn _assert_dyn(_: Arc<dyn BaseReasoner>) {}
        _assert_dyn(Arc::new(OfflineReasoner));
    }
}
