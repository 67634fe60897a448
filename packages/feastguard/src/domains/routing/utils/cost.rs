//! Routing cost: lower is better.
//!
//! cost = distance * weight + utilization penalty
//!
//! Perishable food doubles the distance weight. The utilization penalty is
//! zero while the donation fills 30%-90% of the recipient's total capacity
//! and grows linearly outside that band.

use crate::common::round2;

pub const PERISHABLE_DISTANCE_WEIGHT: f64 = 2.0;
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 1.0;
pub const UTILIZATION_BAND_LOW: f64 = 0.3;
pub const UTILIZATION_BAND_HIGH: f64 = 0.9;
pub const UTILIZATION_PENALTY_RATE: f64 = 5.0;

pub fn utilization_penalty(volume_kg: f64, capacity_kg: f64) -> f64 {
    let utilization = if capacity_kg > 0.0 {
        volume_kg / capacity_kg
    } else {
        0.0
    };

    if utilization < UTILIZATION_BAND_LOW {
        UTILIZATION_PENALTY_RATE * (UTILIZATION_BAND_LOW - utilization)
    } else if utilization > UTILIZATION_BAND_HIGH {
        UTILIZATION_PENALTY_RATE * (utilization - UTILIZATION_BAND_HIGH)
    } else {
        0.0
    }
}

pub fn calculate_routing_cost(
    distance_km: f64,
    volume_kg: f64,
    capacity_kg: f64,
    is_perishable: bool,
) -> f64 {
    let weight = if is_perishable {
        PERISHABLE_DISTANCE_WEIGHT
    } else {
        DEFAULT_DISTANCE_WEIGHT
    };

    let cost = distance_km * weight + utilization_penalty(volume_kg, capacity_kg);
    round2(cost)
}
