// FeastGuard - predictive food surplus redistribution
//
// Turns a list of upcoming catered events into surplus predictions, matches
// the surplus to recipient organizations, and drafts outreach messages.
// The workflow engine in workflow/ sequences the per-domain steps in
// domains/*/activities/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod workflow;

pub use config::*;
