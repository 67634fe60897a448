//! Deterministic outreach text: pickup windows, send-time buckets, the
//! template message used when text generation is unavailable, and the
//! display layout for a finished message.

use crate::common::{FoodCategory, Urgency};
use crate::domains::outreach::models::OutreachMessage;

pub fn pickup_window(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "within 2 hours (perishable)",
        Urgency::Medium => "today, before evening",
        Urgency::Low => "flexible scheduling available",
    }
}

pub fn estimated_send_time(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "immediate",
        _ => "within 1 hour",
    }
}

/// One-line guidance given to the text generator for each urgency.
pub fn urgency_context(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => {
            "This is time-sensitive perishable food that must be picked up within 2 hours."
        }
        Urgency::Medium => "Please confirm availability for pickup today.",
        Urgency::Low => "This is non-perishable food with flexible pickup timing.",
    }
}

fn urgency_intro(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "We have time-sensitive perishable food available",
        Urgency::Medium => "We have fresh food available",
        Urgency::Low => "We have surplus food available",
    }
}

/// Everything a message body needs.
#[derive(Debug, Clone, Copy)]
pub struct MessageDetails<'a> {
    pub recipient_name: &'a str,
    pub event_name: &'a str,
    pub volume_kg: f64,
    pub category: FoodCategory,
    pub pickup_window: &'a str,
    pub urgency: Urgency,
}

pub fn template_message(details: &MessageDetails<'_>) -> String {
    format!(
        "Hello {recipient},\n\n\
         {intro} from {event} that would be perfect for your organization. \
         We have approximately {volume}kg of {category} food ready for pickup {pickup}.\n\n\
         This is an excellent opportunity to provide fresh meals to those you serve. \
         Can you confirm your availability for pickup?\n\n\
         Please respond at your earliest convenience. \
         Thank you for your partnership in reducing food waste!\n\n\
         Best regards,\n\
         FeastGuard.AI Coordination System",
        recipient = details.recipient_name,
        intro = urgency_intro(details.urgency),
        event = details.event_name,
        volume = details.volume_kg,
        category = details.category,
        pickup = details.pickup_window,
    )
}

/// Full message with header and strategy footer, for terminal output.
pub fn format_message_for_display(message: &OutreachMessage) -> String {
    let rule = "=".repeat(60);
    format!(
        "{rule}
OUTREACH MESSAGE
{rule}
To: {to}
Re: {event} - Food Donation Opportunity
Priority: {priority}
Volume: {volume}kg {category}
Distance: {distance:.1}km
Pickup: {pickup}
{rule}

{body}

{rule}
Strategy: {strategy}
Send Time: {send}
{rule}",
        to = message.recipient_name,
        event = message.event_name,
        priority = message.urgency_level.as_str().to_uppercase(),
        volume = message.volume_kg,
        category = message.food_category,
        distance = message.distance_km,
        pickup = message.pickup_window,
        body = message.message_content,
        strategy = message.strategy_reasoning,
        send = message.estimated_send_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_windows() {
        assert_eq!(pickup_window(Urgency::High), "within 2 hours (perishable)");
        assert_eq!(pickup_window(Urgency::Medium), "today, before evening");
        assert_eq!(pickup_window(Urgency::Low), "flexible scheduling available");
    }

    #[test]
    fn test_send_time_buckets() {
        assert_eq!(estimated_send_time(Urgency::High), "immediate");
        assert_eq!(estimated_send_time(Urgency::Medium), "within 1 hour");
        assert_eq!(estimated_send_time(Urgency::Low), "within 1 hour");
    }

    #[test]
    fn test_template_message_includes_logistics() {
        let text = template_message(&MessageDetails {
            recipient_name: "Downtown Soup Kitchen",
            event_name: "Charity Gala #3",
            volume_kg: 120.5,
            category: FoodCategory::Perishable,
            pickup_window: pickup_window(Urgency::High),
            urgency: Urgency::High,
        });

        assert!(text.starts_with("Hello Downtown Soup Kitchen,"));
        assert!(
            text.contains("We have time-sensitive perishable food available from Charity Gala #3")
        );
        assert!(text.contains("approximately 120.5kg of perishable food"));
        assert!(text.contains("within 2 hours (perishable)"));
    }

    #[test]
    fn test_display_layout() {
        let message = OutreachMessage {
            recipient_id: "R01".to_string(),
            recipient_name: "Pantry".to_string(),
            event_id: "E001".to_string(),
            event_name: "Gala".to_string(),
            message_content: "Body".to_string(),
            urgency_level: Urgency::Medium,
            volume_kg: 80.0,
            food_category: FoodCategory::NonPerishable,
            distance_km: 3.456,
            pickup_window: pickup_window(Urgency::Medium).to_string(),
            strategy_reasoning: "Gentle urgency".to_string(),
            estimated_send_time: "within 1 hour".to_string(),
        };

        let display = format_message_for_display(&message);
        assert!(display.contains("Priority: MEDIUM"));
        assert!(display.contains("Volume: 80kg non_perishable"));
        assert!(display.contains("Distance: 3.5km"));
        assert!(display.contains("\nBody\n"));
    }
}
