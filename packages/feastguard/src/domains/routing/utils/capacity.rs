//! Pure recipient capacity checks
//!
//! Two passes use these: a lenient pre-filter (half the volume must fit) that
//! narrows the candidate list, and the hard check (all of it must fit) applied
//! while scoring.

use serde::Serialize;

use crate::common::{round2, FoodCategory};
use crate::domains::intake::Recipient;

/// Share of the predicted volume a recipient must have room for to be
/// considered at all.
pub const PREFILTER_CAPACITY_RATIO: f64 = 0.5;

/// Outcome of the hard capacity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityCheck {
    pub can_accept: bool,
    pub available_capacity_kg: f64,
    /// Load after accepting the donation, as a percentage of total capacity
    pub utilization_pct: f64,
    pub would_exceed: bool,
}

pub fn check_recipient_capacity(recipient: &Recipient, volume_kg: f64) -> CapacityCheck {
    let available = recipient.available_capacity_kg();
    let can_accept = available >= volume_kg;
    let utilization = if recipient.capacity_kg > 0.0 {
        (recipient.current_load_kg + volume_kg) / recipient.capacity_kg * 100.0
    } else {
        0.0
    };

    CapacityCheck {
        can_accept,
        available_capacity_kg: round2(available),
        utilization_pct: (utilization * 10.0).round() / 10.0,
        would_exceed: !can_accept,
    }
}

/// Recipients that accept `category` and have at least `min_capacity_kg` free,
/// in input order.
pub fn available_recipients<'a>(
    recipients: &'a [Recipient],
    category: FoodCategory,
    min_capacity_kg: f64,
) -> Vec<&'a Recipient> {
    recipients
        .iter()
        .filter(|r| r.accepts(category))
        .filter(|r| r.available_capacity_kg() >= min_capacity_kg)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(id: &str, capacity: f64, load: f64, perishable: bool, dry: bool) -> Recipient {
        Recipient {
            id: id.to_string(),
            name: format!("Recipient {}", id),
            location: None,
            capacity_kg: capacity,
            current_load_kg: load,
            accepts_perishable: perishable,
            accepts_non_perishable: dry,
            operating_hours: None,
            contact_available: None,
        }
    }

    #[test]
    fn test_capacity_check_fails_when_volume_exceeds_free_space() {
        let check = check_recipient_capacity(&recipient("R01", 100.0, 80.0, true, true), 50.0);
        assert!(!check.can_accept);
        assert!(check.would_exceed);
        assert_eq!(check.available_capacity_kg, 20.0);
        assert_eq!(check.utilization_pct, 130.0);
    }

    #[test]
    fn test_capacity_check_passes_on_exact_fit() {
        let check = check_recipient_capacity(&recipient("R01", 100.0, 50.0, true, true), 50.0);
        assert!(check.can_accept);
        assert_eq!(check.utilization_pct, 100.0);
    }

    #[test]
    fn test_zero_capacity_reports_zero_utilization() {
        let check = check_recipient_capacity(&recipient("R01", 0.0, 0.0, true, true), 10.0);
        assert!(!check.can_accept);
        assert_eq!(check.utilization_pct, 0.0);
    }

    #[test]
    fn test_prefilter_by_category_and_half_capacity() {
        let recipients = vec![
            recipient("R01", 100.0, 0.0, true, false),
            recipient("R02", 100.0, 0.0, false, true),
            recipient("R03", 100.0, 80.0, true, true),
            recipient("R04", 100.0, 75.0, true, true),
        ];

        let ids: Vec<&str> = available_recipients(&recipients, FoodCategory::Perishable, 25.0)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["R01", "R04"]);

        let dry = available_recipients(&recipients, FoodCategory::NonPerishable, 25.0);
        assert_eq!(dry.len(), 2);
    }
}
