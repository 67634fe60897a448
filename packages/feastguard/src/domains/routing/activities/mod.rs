pub mod route;

pub use route::{find_route, route_step, score_candidates, RouteOutcome};
