//! Message step: draft outreach for the route belonging to the current event.
//!
//! Always advances the cursor by exactly one, whether or not a message is
//! produced.

use tracing::{debug, info, warn};

use crate::common::Urgency;
use crate::domains::outreach::models::OutreachMessage;
use crate::domains::outreach::utils::{
    estimated_send_time, pickup_window, template_message, urgency_context, MessageDetails,
};
use crate::domains::routing::Route;
use crate::kernel::{BaseReasoner, ReasoningRequest, WorkflowDeps};
use crate::workflow::trace::{agent_log, OUTREACH_AGENT};
use crate::workflow::{StateUpdate, WorkflowState};

const STRATEGY_SYSTEM_PROMPT: &str = "You are a communication specialist for FeastGuard.AI.

Your role is to draft professional, warm outreach messages for food donation coordination.

Message guidelines:
1. Professional but friendly tone
2. Clear call-to-action
3. Include key logistics (volume, timing, food type)
4. Emphasize urgency appropriately
5. Be concise (3-4 sentences)

Adapt tone based on urgency:
- HIGH urgency: Direct, time-sensitive language
- MEDIUM urgency: Professional with gentle urgency
- LOW urgency: Relaxed, opportunity-focused";

const BODY_SYSTEM_PROMPT: &str =
    "You are FeastGuard.AI, an autonomous food redistribution coordinator.";

const BODY_TEMPERATURE: f32 = 0.7;
const STRATEGY_TEMPERATURE: f32 = 0.6;
const PREVIEW_CHARS: usize = 150;

/// A drafted message plus the text-generation failures behind any fallback
/// text it carries.
#[derive(Debug, Clone)]
pub struct Draft {
    pub message: OutreachMessage,
    pub body_fallback: Option<String>,
    pub strategy_fallback: Option<String>,
}

pub async fn message_step(state: &WorkflowState, deps: &WorkflowDeps) -> StateUpdate {
    let mut update = StateUpdate {
        current_event_idx: Some(state.current_event_idx + 1),
        ..StateUpdate::default()
    };

    let current_id = state.current_event().map(|e| e.id.as_str());
    let route = match state.routes.last() {
        Some(route) if Some(route.event_id.as_str()) == current_id => route,
        _ => {
            debug!(
                cursor = state.current_event_idx,
                "No route for current event"
            );
            update
                .agent_logs
                .push(agent_log(OUTREACH_AGENT, "No message needed"));
            return update;
        }
    };

    let Some(draft) = draft_message(route, deps.reasoner.as_ref()).await else {
        update.agent_logs.push(agent_log(
            OUTREACH_AGENT,
            format!("No recipient matched for {}", route.event_name),
        ));
        return update;
    };

    if let Some(error) = &draft.body_fallback {
        update.agent_logs.push(agent_log(
            OUTREACH_AGENT,
            format!(
                "Message generation unavailable for {} ({}), using template",
                route.event_id, error
            ),
        ));
    }
    if let Some(error) = &draft.strategy_fallback {
        update.agent_logs.push(agent_log(
            OUTREACH_AGENT,
            format!(
                "Strategy reasoning unavailable for {} ({}), using fallback",
                route.event_id, error
            ),
        ));
    }

    let message = draft.message;
    info!(
        event_id = %message.event_id,
        recipient_id = %message.recipient_id,
        urgency = %message.urgency_level,
        "Outreach message drafted"
    );
    update.agent_logs.push(format_log(&message));
    update.messages.push(message);
    update
}

/// Build the outreach message for a matched route. `None` for a null match.
///
/// Text generation failures fall back to the template body and a fixed
/// strategy sentence, and are reported on the draft.
pub async fn draft_message(route: &Route, reasoner: &dyn BaseReasoner) -> Option<Draft> {
    let recipient_id = route.recipient_id.clone()?;

    let pickup = pickup_window(route.urgency);
    let details = MessageDetails {
        recipient_name: &route.recipient_name,
        event_name: &route.event_name,
        volume_kg: route.volume_kg,
        category: route.food_category,
        pickup_window: pickup,
        urgency: route.urgency,
    };

    let mut body_fallback = None;
    let message_content = match reasoner.reason(body_request(&details)).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                event_id = %route.event_id,
                error = %e,
                "Message generation unavailable, using template"
            );
            body_fallback = Some(e.to_string());
            template_message(&details)
        }
    };

    let mut strategy_fallback = None;
    let strategy_reasoning = match reasoner
        .reason(strategy_request(route, &message_content))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(
                event_id = %route.event_id,
                error = %e,
                "Strategy reasoning unavailable, using fallback"
            );
            strategy_fallback = Some(e.to_string());
            fallback_strategy(route)
        }
    };

    let message = OutreachMessage {
        recipient_id,
        recipient_name: route.recipient_name.clone(),
        event_id: route.event_id.clone(),
        event_name: route.event_name.clone(),
        message_content,
        urgency_level: route.urgency,
        volume_kg: route.volume_kg,
        food_category: route.food_category,
        distance_km: route.distance_km,
        pickup_window: pickup.to_string(),
        strategy_reasoning,
        estimated_send_time: estimated_send_time(route.urgency).to_string(),
    };

    Some(Draft {
        message,
        body_fallback,
        strategy_fallback,
    })
}

fn body_request(details: &MessageDetails<'_>) -> ReasoningRequest {
    let user = format!(
        "Generate a professional, warm outreach message to coordinate food donation pickup.

Details:
- Recipient: {}
- Event: {}
- Food Volume: {}kg
- Food Type: {}
- Pickup Time: {}
- Urgency: {}

The message should:
1. Be professional but friendly
2. Clearly state the opportunity
3. Include key logistics (volume, timing, food type)
4. Include a call-to-action
5. Be concise (3-4 sentences)

Generate only the message text, no subject line or signatures.",
        details.recipient_name,
        details.event_name,
        details.volume_kg,
        details.category,
        details.pickup_window,
        urgency_context(details.urgency),
    );
    ReasoningRequest::new(BODY_SYSTEM_PROMPT, user, BODY_TEMPERATURE)
}

fn strategy_request(route: &Route, message: &str) -> ReasoningRequest {
    let preview: String = message.chars().take(PREVIEW_CHARS).collect();
    let user = format!(
        "Analyze this outreach message strategy:

Context:
- Recipient: {}
- Food: {}kg {}
- Distance: {:.1}km
- Urgency: {}

Message Preview:
{}...

In one sentence, explain the communication strategy and tone used.",
        route.recipient_name,
        route.volume_kg,
        route.food_category,
        route.distance_km,
        route.urgency,
        preview,
    );
    ReasoningRequest::new(STRATEGY_SYSTEM_PROMPT, user, STRATEGY_TEMPERATURE)
}

fn fallback_strategy(route: &Route) -> String {
    let tone = match route.urgency {
        Urgency::High => "direct, time-sensitive",
        Urgency::Medium => "professional with gentle urgency",
        Urgency::Low => "relaxed, opportunity-focused",
    };
    format!(
        "Template outreach in a {} tone, stating volume, food type and pickup window up front.",
        tone
    )
}

fn format_log(message: &OutreachMessage) -> String {
    agent_log(
        OUTREACH_AGENT,
        format!(
            "Message for {}: {}kg {} (send: {})",
            message.recipient_name,
            message.volume_kg,
            message.food_category,
            message.estimated_send_time
        ),
    )
}
