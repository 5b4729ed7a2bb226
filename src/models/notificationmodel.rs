use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::negotiationmodel::ParticipantRole;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "negotiation_event", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NegotiationEvent {
    Submitted,
    Accepted,
    Declined,
    Deleted,
}

impl NegotiationEvent {
    pub fn to_str(&self) -> &str {
        match self {
            NegotiationEvent::Submitted => "submitted",
            NegotiationEvent::Accepted => "accepted",
            NegotiationEvent::Declined => "declined",
            NegotiationEvent::Deleted => "deleted",
        }
    }
}

/// Outbox row consumed by the external notification dispatcher. The core
/// only records the event; all outbound email/SMS happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub proposal_id: Uuid,
    pub event_type: NegotiationEvent,
    pub recipient_role: ParticipantRole,
    pub data: Option<serde_json::Value>,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
}
