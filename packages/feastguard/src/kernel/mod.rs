//! Kernel module - infrastructure traits and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ChatReasoner, OfflineReasoner, WorkflowDeps};
pub use test_dependencies::MockReasoner;
pub use traits::*;
