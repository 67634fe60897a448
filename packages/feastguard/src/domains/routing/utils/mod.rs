pub mod capacity;
pub mod cost;
pub mod distance;

pub use capacity::{
    available_recipients, check_recipient_capacity, CapacityCheck, PREFILTER_CAPACITY_RATIO,
};
pub use cost::{calculate_routing_cost, utilization_penalty};
pub use distance::{haversine_km, EARTH_RADIUS_KM};
