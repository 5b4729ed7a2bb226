// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::{negotiationmodel::ParticipantRole, notificationmodel::*};

#[async_trait]
pub trait NotificationExt {
    async fn create_notification(
        &self,
        booking_id: Uuid,
        proposal_id: Uuid,
        event_type: NegotiationEvent,
        recipient_role: ParticipantRole,
        data: Option<serde_json::Value>,
        message: String,
    ) -> Result<Notification, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn create_notification(
        &self,
        booking_id: Uuid,
        proposal_id: Uuid,
        event_type: NegotiationEvent,
        recipient_role: ParticipantRole,
        data: Option<serde_json::Value>,
        message: String,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications
            (booking_id, proposal_id, event_type, recipient_role, data, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, booking_id, proposal_id,
                event_type, recipient_role,
                data, message, created_at
            "#,
        )
        .bind(booking_id)
        .bind(proposal_id)
        .bind(event_type)
        .bind(recipient_role)
        .bind(data)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }
}
