//! Predict step: forecast surplus for the event at the cursor.
//!
//! Never advances the cursor. Only Skip and Message do that, so every event
//! passes through exactly one of them before the next prediction.

use tracing::{debug, info, warn};

use crate::domains::intake::Event;
use crate::domains::prediction::models::Prediction;
use crate::domains::prediction::utils::{
    assess_confidence, calculate_surplus_score, estimate_food_volume,
};
use crate::kernel::{ReasoningRequest, WorkflowDeps};
use crate::workflow::trace::{agent_log, event_banner, PREDICTION_AGENT};
use crate::workflow::{StateUpdate, WorkflowState};

const SYSTEM_PROMPT: &str = "You are a food waste prediction specialist for FeastGuard.AI.

Your role is to analyze event data and predict if food surplus will occur.

Consider these factors:
1. Attendee count (more people = more potential waste)
2. Catering type (buffet > family_style > plated)
3. Event duration (longer events = more waste)
4. Weather conditions (affects attendance and consumption)

Think step-by-step about surplus likelihood and provide your reasoning.";

const TEMPERATURE: f32 = 0.7;

pub async fn predict_step(state: &WorkflowState, deps: &WorkflowDeps) -> StateUpdate {
    let idx = state.current_event_idx;
    let Some(event) = state.current_event() else {
        debug!(cursor = idx, "Cursor past last event, nothing to predict");
        return StateUpdate::default();
    };

    info!(
        event_id = %event.id,
        position = idx + 1,
        total = state.total_events,
        "Predicting surplus"
    );

    let mut update = StateUpdate::default();
    update.agent_logs.push(event_banner(idx + 1, state.total_events, &event.name));

    for field in event.defaulted_fields() {
        update.agent_logs.push(agent_log(
            PREDICTION_AGENT,
            format!("{}: missing {}, using default", event.id, field),
        ));
    }

    let surplus_score = calculate_surplus_score(event);
    let estimate = estimate_food_volume(event, surplus_score);
    let confidence = assess_confidence(event, surplus_score);

    let reasoning = match deps.reasoner.reason(reasoning_request(event)).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                event_id = %event.id,
                error = %e,
                "Surplus reasoning unavailable, using fallback"
            );
            update.agent_logs.push(agent_log(
                PREDICTION_AGENT,
                format!("Reasoning unavailable for {} ({}), using fallback", event.id, e),
            ));
            fallback_reasoning(event, surplus_score)
        }
    };

    let prediction = Prediction {
        event_id: event.id.clone(),
        event_name: event.name.clone(),
        has_surplus: estimate.category.is_surplus(),
        predicted_kg: estimate.predicted_kg,
        category: estimate.category,
        urgency: estimate.urgency,
        surplus_score,
        confidence,
        reasoning,
    };

    update.agent_logs.push(format_log(&prediction));
    update.processed_events.push(event.id.clone());
    update.predictions.push(prediction);
    update
}

fn reasoning_request(event: &Event) -> ReasoningRequest {
    let user = format!(
        "Analyze this event for food surplus potential:

Event: {}
- Attendees: {}
- Catering Type: {}
- Duration: {} hours
- Weather: {}
- Food Types: {}

Think through:
1. What factors suggest surplus might occur?
2. Is the food likely to be perishable or non-perishable?
3. What's the urgency level for redistribution?

Provide a brief 2-3 sentence analysis.",
        event.name,
        event.attendees_or_default(),
        event.catering_type_or_default(),
        event.duration_or_default(),
        event.weather_or_default(),
        event.food_type.join(", "),
    );
    ReasoningRequest::new(SYSTEM_PROMPT, user, TEMPERATURE)
}

fn fallback_reasoning(event: &Event, surplus_score: f64) -> String {
    format!(
        "Automated estimate: surplus score {:.2} from {} attendees, \
         {} catering over {} hours in {} weather.",
        surplus_score,
        event.attendees_or_default(),
        event.catering_type_or_default(),
        event.duration_or_default(),
        event.weather_or_default(),
    )
}

fn format_log(prediction: &Prediction) -> String {
    if !prediction.has_surplus {
        return agent_log(
            PREDICTION_AGENT,
            format!("{}: No significant surplus expected", prediction.event_name),
        );
    }

    agent_log(
        PREDICTION_AGENT,
        format!(
            "{}: {}kg {} surplus predicted (urgency: {}, confidence: {:.0}%)",
            prediction.event_name,
            prediction.predicted_kg,
            prediction.category,
            prediction.urgency,
            prediction.confidence * 100.0
        ),
    )
}
