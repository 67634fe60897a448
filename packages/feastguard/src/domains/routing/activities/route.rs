//! Route step: match the latest prediction's surplus to a recipient.
//!
//! Recipients are read against their static load. Capacity is not reserved
//! across events, so two events in one run may both pick the same recipient.

use tracing::{debug, info, warn};

use crate::common::GeoPoint;
use crate::domains::intake::{Event, Recipient};
use crate::domains::prediction::Prediction;
use crate::domains::routing::models::{Alternative, Route};
use crate::domains::routing::utils::{
    available_recipients, calculate_routing_cost, check_recipient_capacity, haversine_km,
    CapacityCheck, PREFILTER_CAPACITY_RATIO,
};
use crate::kernel::{BaseReasoner, ReasoningRequest, WorkflowDeps};
use crate::workflow::trace::{agent_log, ROUTING_AGENT};
use crate::workflow::{StateUpdate, WorkflowState};

const SYSTEM_PROMPT: &str = "You are a logistics optimization specialist for FeastGuard.AI.

Your role is to match food surplus with the best recipient organization.

Optimization priorities:
1. URGENCY: Perishable food needs pickup within 2 hours, prioritize nearby recipients
2. CAPACITY: Ensure recipient has space and accepts food type
3. DISTANCE: Minimize travel distance (especially for perishables)
4. UTILIZATION: Prefer recipients who can use most of the volume

Think strategically about the best match.";

const TEMPERATURE: f32 = 0.6;
const MAX_ALTERNATIVES: usize = 2;

pub const REASON_NO_RECIPIENTS: &str = "No recipients available";
pub const REASON_NO_CANDIDATES: &str = "No suitable candidates";
pub const REASON_NO_SURPLUS: &str = "No surplus to route";
pub const REASON_NO_LOCATION: &str = "Event location missing";

/// A recipient that passed every filter, with its score.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub recipient: &'a Recipient,
    pub distance_km: f64,
    pub cost_score: f64,
    pub capacity: CapacityCheck,
}

/// Result of scoring: ranked candidates plus recipients that could not be
/// scored for lack of a location.
#[derive(Debug, Default)]
pub struct ScoredCandidates<'a> {
    pub ranked: Vec<Candidate<'a>>,
    pub unlocated: Vec<&'a str>,
}

/// Outcome of `find_route`.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub route: Route,
    /// Recipients skipped for lack of a location.
    pub unlocated: Vec<String>,
    /// Set when the reasoning text is the fallback. Holds the failure.
    pub fallback: Option<String>,
}

impl RouteOutcome {
    fn null(route: Route) -> Self {
        Self {
            route,
            unlocated: Vec::new(),
            fallback: None,
        }
    }
}

pub async fn route_step(state: &WorkflowState, deps: &WorkflowDeps) -> StateUpdate {
    let mut update = StateUpdate::default();

    let (Some(event), Some(prediction)) = (state.current_event(), state.predictions.last()) else {
        warn!(
            cursor = state.current_event_idx,
            "Route step invoked without a current prediction"
        );
        update
            .agent_logs
            .push(agent_log(ROUTING_AGENT, "No prediction to route"));
        return update;
    };

    if prediction.event_id != event.id {
        warn!(
            event_id = %event.id,
            prediction_event_id = %prediction.event_id,
            "Latest prediction does not belong to the current event"
        );
        update.agent_logs.push(agent_log(
            ROUTING_AGENT,
            format!("No prediction for {}, nothing to route", event.id),
        ));
        return update;
    }

    let outcome = find_route(
        prediction,
        event,
        &state.recipients,
        deps.reasoner.as_ref(),
    )
    .await;

    for recipient_id in &outcome.unlocated {
        update.agent_logs.push(agent_log(
            ROUTING_AGENT,
            format!("Recipient {} has no location, skipped", recipient_id),
        ));
    }

    if let Some(error) = &outcome.fallback {
        update.agent_logs.push(agent_log(
            ROUTING_AGENT,
            format!(
                "Reasoning unavailable for {} ({}), using fallback",
                event.id, error
            ),
        ));
    }

    update.agent_logs.push(format_log(&outcome.route));
    update.routes.push(outcome.route);
    update
}

/// Choose the cheapest recipient for a prediction.
///
/// Precondition violations produce a null-match route, never an error.
pub async fn find_route(
    prediction: &Prediction,
    event: &Event,
    recipients: &[Recipient],
    reasoner: &dyn BaseReasoner,
) -> RouteOutcome {
    if !prediction.has_surplus || prediction.predicted_kg <= 0.0 {
        debug!(
            event_id = %prediction.event_id,
            kg = prediction.predicted_kg,
            "Nothing to route"
        );
        return RouteOutcome::null(Route::no_match(
            prediction,
            event.location,
            REASON_NO_SURPLUS,
        ));
    }

    let Some(event_location) = event.location else {
        return RouteOutcome::null(Route::no_match(prediction, None, REASON_NO_LOCATION));
    };

    let available = available_recipients(
        recipients,
        prediction.category,
        prediction.predicted_kg * PREFILTER_CAPACITY_RATIO,
    );
    if available.is_empty() {
        info!(
            event_id = %prediction.event_id,
            category = %prediction.category,
            "No recipients available"
        );
        return RouteOutcome::null(Route::no_match(
            prediction,
            Some(event_location),
            REASON_NO_RECIPIENTS,
        ));
    }

    let scored = score_candidates(event_location, prediction, &available);
    let unlocated: Vec<String> = scored.unlocated.iter().map(|id| id.to_string()).collect();

    let Some(best) = scored.ranked.first() else {
        info!(
            event_id = %prediction.event_id,
            prefiltered = available.len(),
            "No candidate passed the capacity check"
        );
        return RouteOutcome {
            unlocated,
            ..RouteOutcome::null(Route::no_match(
                prediction,
                Some(event_location),
                REASON_NO_CANDIDATES,
            ))
        };
    };

    let alternatives: Vec<Alternative> = scored
        .ranked
        .iter()
        .skip(1)
        .take(MAX_ALTERNATIVES)
        .map(|c| Alternative {
            recipient_id: c.recipient.id.clone(),
            name: c.recipient.name.clone(),
            distance_km: c.distance_km,
            cost_score: c.cost_score,
        })
        .collect();

    let mut fallback = None;
    let reasoning = match reasoner
        .reason(reasoning_request(prediction, best, &alternatives))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(
                event_id = %prediction.event_id,
                error = %e,
                "Routing reasoning unavailable, using fallback"
            );
            fallback = Some(e.to_string());
            fallback_reasoning(best, scored.ranked.len())
        }
    };

    info!(
        event_id = %prediction.event_id,
        recipient_id = %best.recipient.id,
        distance_km = best.distance_km,
        cost_score = best.cost_score,
        "Route selected"
    );

    let route = Route {
        event_id: prediction.event_id.clone(),
        event_name: prediction.event_name.clone(),
        event_location: Some(event_location),
        recipient_id: Some(best.recipient.id.clone()),
        recipient_name: best.recipient.name.clone(),
        recipient_location: best.recipient.location,
        distance_km: best.distance_km,
        volume_kg: prediction.predicted_kg,
        food_category: prediction.category,
        urgency: prediction.urgency,
        cost_score: Some(best.cost_score),
        reasoning,
        alternatives,
    };

    RouteOutcome {
        route,
        unlocated,
        fallback,
    }
}

/// Distance, hard capacity check and cost for every pre-filtered recipient,
/// sorted by ascending cost. The sort is stable, so ties keep filter order.
pub fn score_candidates<'a>(
    event_location: GeoPoint,
    prediction: &Prediction,
    available: &[&'a Recipient],
) -> ScoredCandidates<'a> {
    let mut scored = ScoredCandidates::default();
    let is_perishable = prediction.category.is_perishable();

    for &recipient in available {
        let Some(location) = recipient.location else {
            scored.unlocated.push(recipient.id.as_str());
            continue;
        };

        let capacity = check_recipient_capacity(recipient, prediction.predicted_kg);
        if !capacity.can_accept {
            continue;
        }

        let distance_km = haversine_km(event_location, location);
        let cost_score = calculate_routing_cost(
            distance_km,
            prediction.predicted_kg,
            recipient.capacity_kg,
            is_perishable,
        );

        scored.ranked.push(Candidate {
            recipient,
            distance_km,
            cost_score,
            capacity,
        });
    }

    scored.ranked.sort_by(|a, b| a.cost_score.total_cmp(&b.cost_score));
    scored
}

fn reasoning_request(
    prediction: &Prediction,
    best: &Candidate<'_>,
    alternatives: &[Alternative],
) -> ReasoningRequest {
    let mut alt_text = String::new();
    if !alternatives.is_empty() {
        alt_text.push_str("\nAlternatives considered:\n");
        for alt in alternatives {
            alt_text.push_str(&format!(
                "- {}: {:.1}km (cost: {})\n",
                alt.name, alt.distance_km, alt.cost_score
            ));
        }
    }

    let user = format!(
        "Analyze this routing decision:

Selected Match:
- Recipient: {}
- Distance: {:.1}km
- Cost Score: {} (lower is better)
- Food: {}kg {}
- Urgency: {}
{}
Explain in 1-2 sentences why this is the optimal match.",
        best.recipient.name,
        best.distance_km,
        best.cost_score,
        prediction.predicted_kg,
        prediction.category,
        prediction.urgency,
        alt_text,
    );
    ReasoningRequest::new(SYSTEM_PROMPT, user, TEMPERATURE)
}

fn fallback_reasoning(best: &Candidate<'_>, candidate_count: usize) -> String {
    format!(
        "Selected {} at {:.1}km with cost score {}, the lowest of {} qualifying recipient(s).",
        best.recipient.name, best.distance_km, best.cost_score, candidate_count
    )
}

fn format_log(route: &Route) -> String {
    if !route.is_match() {
        return agent_log(
            ROUTING_AGENT,
            format!("{}: {}", route.event_name, route.reasoning),
        );
    }

    agent_log(
        ROUTING_AGENT,
        format!(
            "{} -> {}: {:.1}km, {}kg {}",
            route.event_name,
            route.recipient_name,
            route.distance_km,
            route.volume_kg,
            route.food_category
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{FoodCategory, Urgency};
    use crate::kernel::MockReasoner;

    fn event() -> Event {
        Event {
            id: "E001".to_string(),
            name: "Gala".to_string(),
            attendees: Some(400),
            catering_type: Some("buffet".to_string()),
            duration_hours: Some(4.0),
            weather: Some("mild".to_string()),
            food_type: vec![],
            location: Some(GeoPoint::new(39.7392, -104.9903)),
            date: None,
            status: None,
        }
    }

    fn prediction(kg: f64, category: FoodCategory) -> Prediction {
        Prediction {
            event_id: "E001".to_string(),
            event_name: "Gala".to_string(),
            has_surplus: category.is_surplus(),
            predicted_kg: kg,
            category,
            urgency: Urgency::High,
            surplus_score: 0.7,
            confidence: 0.85,
            reasoning: String::new(),
        }
    }

    fn recipient(id: &str, lat_offset: f64, capacity: f64, load: f64) -> Recipient {
        Recipient {
            id: id.to_string(),
            name: format!("Pantry {}", id),
            location: Some(GeoPoint::new(39.7392 + lat_offset, -104.9903)),
            capacity_kg: capacity,
            current_load_kg: load,
            accepts_perishable: true,
            accepts_non_perishable: true,
            operating_hours: None,
            contact_available: None,
        }
    }

    #[tokio::test]
    async fn test_picks_cheapest_and_ranks_alternatives() {
        let recipients = vec![
            recipient("R01", 0.05, 100.0, 0.0),
            recipient("R02", 0.01, 100.0, 0.0),
            recipient("R03", 0.10, 100.0, 0.0),
            recipient("R04", 0.20, 100.0, 0.0),
        ];
        let reasoner = MockReasoner::new().with_response("Closest pantry with room.");
        let prediction = prediction(50.0, FoodCategory::Perishable);

        let outcome = find_route(&prediction, &event(), &recipients, &reasoner).await;

        assert!(outcome.unlocated.is_empty());
        assert_eq!(outcome.fallback, None);
        let route = outcome.route;
        assert_eq!(route.recipient_id.as_deref(), Some("R02"));
        assert_eq!(route.reasoning, "Closest pantry with room.");
        let alt_ids: Vec<&str> = route
            .alternatives
            .iter()
            .map(|a| a.recipient_id.as_str())
            .collect();
        assert_eq!(alt_ids, vec!["R01", "R03"]);
        assert!(reasoner.was_called_with("Alternatives considered"));
    }

    #[tokio::test]
    async fn test_capacity_check_excludes_recipient_with_little_room() {
        // 30kg free: survives the 25kg pre-filter, fails the 50kg hard check
        let recipients = vec![recipient("R01", 0.01, 100.0, 70.0)];
        let reasoner = MockReasoner::new();
        let prediction = prediction(50.0, FoodCategory::Perishable);

        let route = find_route(&prediction, &event(), &recipients, &reasoner)
            .await
            .route;

        assert!(!route.is_match());
        assert_eq!(route.reasoning, "Unable to route: No suitable candidates");
        assert_eq!(reasoner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_accepting_recipient_is_no_recipients_available() {
        let mut dry_only = recipient("R01", 0.01, 500.0, 0.0);
        dry_only.accepts_perishable = false;

        let route = find_route(
            &prediction(50.0, FoodCategory::Perishable),
            &event(),
            &[dry_only],
            &MockReasoner::new(),
        )
        .await
        .route;

        assert_eq!(route.recipient_id, None);
        assert_eq!(route.recipient_name, "NO MATCH");
        assert_eq!(route.reasoning, "Unable to route: No recipients available");
        assert!(route.alternatives.is_empty());
    }

    #[tokio::test]
    async fn test_zero_volume_is_null_match() {
        let route = find_route(
            &prediction(0.0, FoodCategory::Perishable),
            &event(),
            &[recipient("R01", 0.01, 100.0, 0.0)],
            &MockReasoner::new(),
        )
        .await
        .route;

        assert!(!route.is_match());
        assert_eq!(route.reasoning, "Unable to route: No surplus to route");
    }

    #[tokio::test]
    async fn test_missing_event_location_is_null_match() {
        let mut e = event();
        e.location = None;

        let route = find_route(
            &prediction(50.0, FoodCategory::Perishable),
            &e,
            &[recipient("R01", 0.01, 100.0, 0.0)],
            &MockReasoner::new(),
        )
        .await
        .route;

        assert_eq!(route.reasoning, "Unable to route: Event location missing");
    }

    #[tokio::test]
    async fn test_unlocated_recipients_are_reported() {
        let mut lost = recipient("R01", 0.0, 100.0, 0.0);
        lost.location = None;
        let recipients = vec![lost, recipient("R02", 0.02, 100.0, 0.0)];

        let outcome = find_route(
            &prediction(50.0, FoodCategory::Perishable),
            &event(),
            &recipients,
            &MockReasoner::new(),
        )
        .await;

        assert_eq!(outcome.unlocated, vec!["R01".to_string()]);
        assert_eq!(outcome.route.recipient_id.as_deref(), Some("R02"));
    }

    #[tokio::test]
    async fn test_reasoner_failure_uses_fallback() {
        let outcome = find_route(
            &prediction(50.0, FoodCategory::Perishable),
            &event(),
            &[recipient("R01", 0.01, 100.0, 0.0)],
            &MockReasoner::failing(),
        )
        .await;

        assert!(outcome.route.is_match());
        assert!(outcome.route.reasoning.starts_with("Selected Pantry R01"));
        assert!(outcome.fallback.is_some());
    }

    #[tokio::test]
    async fn test_route_step_traces_fallback() {
        let deps = MockReasoner::failing().into_deps();
        let mut state = WorkflowState::new(vec![event()], vec![recipient("R01", 0.01, 100.0, 0.0)]);
        state
            .predictions
            .push(prediction(50.0, FoodCategory::Perishable));

        let update = route_step(&state, &deps).await;

        assert_eq!(update.routes.len(), 1);
        assert_eq!(update.agent_logs.len(), 2);
        let (fallback_line, route_line) = (&update.agent_logs[0], &update.agent_logs[1]);
        let unavailable = "[Routing Agent] Reasoning unavailable for E001 (";
        assert!(fallback_line.starts_with(unavailable));
        assert!(fallback_line.ends_with("), using fallback"));
        assert!(route_line.starts_with("[Routing Agent] Gala -> Pantry R01"));
    }

    #[test]
    fn test_equal_costs_keep_filter_order() {
        let a = recipient("R01", 0.01, 100.0, 0.0);
        let b = recipient("R02", 0.01, 100.0, 0.0);
        let available = vec![&a, &b];

        let scored = score_candidates(
            GeoPoint::new(39.7392, -104.9903),
            &prediction(50.0, FoodCategory::NonPerishable),
            &available,
        );

        assert_eq!(scored.ranked[0].recipient.id, "R01");
        assert_eq!(scored.ranked[1].recipient.id, "R02");
    }
}
