// Trait definitions for dependency injection
//
// INFRASTRUCTURE traits only. Prompts and fallback text belong to the domain
// activities that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseReasoner)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Reasoner Trait (Infrastructure - free-form narrative generation)
// =============================================================================

/// One request to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningRequest {
    /// Role description ("You are a logistics optimization specialist...")
    pub system: String,
    /// The concrete task
    pub user: String,
    pub temperature: f32,
}

impl ReasoningRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
        }
    }
}

/// Narrative text generation.
///
/// Output is explanatory only and never drives control flow. Every caller
/// must have a deterministic fallback for the `Err` case.
#[async_trait]
pub trait BaseReasoner: Send + Sync {
    async fn reason(&self, request: ReasoningRequest) -> Result<String>;
}
