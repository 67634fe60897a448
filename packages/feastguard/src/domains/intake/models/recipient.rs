use serde::{Deserialize, Serialize};

use crate::common::lenient::lenient_f64_or_zero;
use crate::common::{FoodCategory, GeoPoint};

/// A food bank, pantry or shelter that can receive donations.
///
/// Read-only during a run. Missing or unusable capacity and load read as
/// zero, missing acceptance flags as `false`, so an incomplete record is
/// simply never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "recipient_id")]
    pub id: String,
    pub name: String,
    pub location: Option<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub capacity_kg: f64,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub current_load_kg: f64,
    #[serde(default)]
    pub accepts_perishable: bool,
    #[serde(default)]
    pub accepts_non_perishable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_available: Option<bool>,
}

impl Recipient {
    pub fn available_capacity_kg(&self) -> f64 {
        self.capacity_kg - self.current_load_kg
    }

    /// Category `none` carries no acceptance constraint.
    pub fn accepts(&self, category: FoodCategory) -> bool {
        match category {
            FoodCategory::Perishable => self.accepts_perishable,
            FoodCategory::NonPerishable => self.accepts_non_perishable,
            FoodCategory::None => true,
        }
    }
}
