//! Routing domain - matching predicted surplus to recipient organizations.

pub mod activities;
pub mod models;
pub mod utils;

pub use activities::{find_route, route_step, RouteOutcome};
pub use models::{Alternative, Route, NO_MATCH};
