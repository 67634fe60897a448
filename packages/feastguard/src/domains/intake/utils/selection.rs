//! Pure helpers for choosing which events a demo run processes.

use crate::domains::intake::models::Event;

/// Heuristic "interestingness": large, buffet-style, long events first.
pub fn interest_score(event: &Event) -> f64 {
    let mut score = event.attendees_or_default() as f64 / 100.0;
    score += match event.catering_type.as_deref() {
        Some("buffet") => 50.0,
        Some("family_style") => 30.0,
        _ => 0.0,
    };
    score + event.duration_or_default() * 5.0
}

/// Keep the `limit` most interesting events, highest score first.
///
/// Stable: equally scored events keep their input order.
pub fn select_top_events(events: Vec<Event>, limit: usize) -> Vec<Event> {
    let mut scored: Vec<(f64, Event)> = events
        .into_iter()
        .map(|e| (interest_score(&e), e))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, attendees: u32, catering: &str, hours: f64) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Event {}", id),
            attendees: Some(attendees),
            catering_type: Some(catering.to_string()),
            duration_hours: Some(hours),
            weather: Some("mild".to_string()),
            food_type: vec![],
            location: None,
            date: None,
            status: None,
        }
    }

    #[test]
    fn test_interest_score() {
        // 10 + 50 + 20
        assert_eq!(interest_score(&event("E1", 1000, "buffet", 4.0)), 80.0);
        // 2 + 30 + 5
        assert_eq!(interest_score(&event("E2", 200, "family_style", 1.0)), 37.0);
    }

    #[test]
    fn test_select_top_events_orders_and_limits() {
        let events = vec![
            event("E1", 100, "plated", 2.0),
            event("E2", 900, "buffet", 5.0),
            event("E3", 300, "family_style", 3.0),
        ];

        let top = select_top_events(events, 2);
        let ids: Vec<&str> = top.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E3"]);
    }

    #[test]
    fn test_select_top_events_is_stable_on_ties() {
        let events = vec![event("A", 100, "plated", 1.0), event("B", 100, "plated", 1.0)];
        let top = select_top_events(events, 5);
        assert_eq!(top[0].id, "A");
        assert_eq!(top[1].id, "B");
    }
}
