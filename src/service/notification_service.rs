// service/notification_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt},
    models::{negotiationmodel::*, notificationmodel::NegotiationEvent},
    service::error::ServiceError,
};

/// Writes negotiation events to the notifications outbox. The dispatcher
/// that turns these rows into emails/SMS runs outside this service.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_proposal_submitted(
        &self,
        proposal: &ScheduleProposal,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Proposal submitted: {} for booking {} by {}",
            proposal.id,
            proposal.booking_id,
            proposal.proposed_by.to_str()
        );

        self.store_event(
            proposal,
            NegotiationEvent::Submitted,
            proposal.proposed_by.counterparty(),
            format!(
                "New installation date proposed: {}",
                proposal.proposed_date
            ),
        )
        .await
    }

    pub async fn notify_proposal_resolved(
        &self,
        proposal: &ScheduleProposal,
        responder: ParticipantRole,
    ) -> Result<(), ServiceError> {
        let event = match proposal.status {
            ProposalStatus::Accepted => NegotiationEvent::Accepted,
            ProposalStatus::Declined => NegotiationEvent::Declined,
            ProposalStatus::Pending => {
                return Err(ServiceError::Notification(format!(
                    "Proposal {} is still pending, nothing to notify",
                    proposal.id
                )))
            }
        };

        tracing::info!(
            "Proposal {}: {} by {}",
            event.to_str(),
            proposal.id,
            responder.to_str()
        );

        self.store_event(
            proposal,
            event,
            responder.counterparty(),
            format!(
                "Your proposed date {} was {}",
                proposal.proposed_date,
                event.to_str()
            ),
        )
        .await
    }

    pub async fn notify_proposal_deleted(
        &self,
        proposal: &ScheduleProposal,
        requester: ParticipantRole,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Proposal deleted: {} from booking {} by {}",
            proposal.id,
            proposal.booking_id,
            requester.to_str()
        );

        self.store_event(
            proposal,
            NegotiationEvent::Deleted,
            requester.counterparty(),
            format!(
                "A proposal for {} was removed from the negotiation",
                proposal.proposed_date
            ),
        )
        .await
    }

    async fn store_event(
        &self,
        proposal: &ScheduleProposal,
        event_type: NegotiationEvent,
        recipient_role: ParticipantRole,
        message: String,
    ) -> Result<(), ServiceError> {
        self.db_client
            .create_notification(
                proposal.booking_id,
                proposal.id,
                event_type,
                recipient_role,
                Some(serde_json::json!({
                    "proposed_date": proposal.proposed_date,
                    "time_slot": proposal.proposed_time_slot.map(|s| s.to_str().to_string()),
                    "proposed_by": proposal.proposed_by.to_str(),
                    "status": proposal.status.to_str(),
                })),
                message,
            )
            .await?;

        Ok(())
    }
}
