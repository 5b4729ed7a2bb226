// service/negotiation_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{bookingdb::BookingExt, db::DBClient, negotiationdb::NegotiationExt},
    dtos::negotiationdtos::*,
    models::{bookingmodel::Booking, negotiationmodel::*},
    service::{error::ServiceError, notification_service::NotificationService},
    utils::scheduling::{validate_proposed_date, validate_time_terms},
};

#[derive(Debug, Clone)]
pub struct NegotiationService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl NegotiationService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    /// Validates and records a new pending proposal. Older pending proposals
    /// from either party are left untouched; supersession is derived at read
    /// time so the negotiation history stays complete.
    pub async fn submit_proposal(
        &self,
        data: SubmitProposalDto,
    ) -> Result<ScheduleProposal, ServiceError> {
        let booking = self
            .db_client
            .get_booking_by_id(data.booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(data.booking_id))?;

        if booking.is_cancelled() {
            return Err(ServiceError::BookingCancelled(booking.id));
        }

        validate_proposed_date(data.proposed_date, Utc::now().date_naive())
            .map_err(ServiceError::Validation)?;

        validate_time_terms(data.time_slot, data.start_time, data.end_time)
            .map_err(ServiceError::Validation)?;

        let proposal = self
            .db_client
            .create_proposal(
                data.booking_id,
                data.proposed_date,
                data.time_slot,
                data.start_time,
                data.end_time,
                data.message,
                data.role,
            )
            .await?;

        self.notification_service
            .notify_proposal_submitted(&proposal)
            .await?;

        Ok(proposal)
    }

    /// Accepts or declines a pending proposal. The pending-status check runs
    /// inside the UPDATE itself, so of two racing responses exactly one
    /// lands; the loser gets the proposal's actual current status back.
    pub async fn respond_to_proposal(
        &self,
        proposal_id: Uuid,
        data: RespondProposalDto,
    ) -> Result<ScheduleProposal, ServiceError> {
        data.require_decline_reason()
            .map_err(ServiceError::Validation)?;

        let status = match data.decision {
            ProposalDecision::Accept => ProposalStatus::Accepted,
            ProposalDecision::Decline => ProposalStatus::Declined,
        };

        let updated = self
            .db_client
            .resolve_pending_proposal(proposal_id, data.role, status, data.message)
            .await?;

        match updated {
            Some(proposal) => {
                self.notification_service
                    .notify_proposal_resolved(&proposal, data.role)
                    .await?;

                Ok(proposal)
            }
            None => {
                // The optimistic update matched nothing; re-read to tell the
                // caller exactly why.
                let current = self
                    .db_client
                    .get_proposal_by_id(proposal_id)
                    .await?
                    .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

                if !current.status.can_transition_to(status) {
                    return Err(ServiceError::InvalidProposalStatus(
                        proposal_id,
                        current.status,
                    ));
                }

                Err(ServiceError::Validation(
                    "A proposal cannot be answered by the role that authored it".to_string(),
                ))
            }
        }
    }

    /// Hard-deletes a proposal unless it is the most recent entry of its
    /// booking's history. The latest-entry check re-runs under a row lock in
    /// the same transaction as the DELETE, so a concurrent submit or delete
    /// cannot leave the negotiation without its auditable tail.
    pub async fn delete_proposal(
        &self,
        proposal_id: Uuid,
        requester: ParticipantRole,
    ) -> Result<(), ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let target = self
            .db_client
            .get_proposal_for_update(proposal_id, &mut tx)
            .await?
            .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        let latest_seq = self
            .db_client
            .latest_proposal_seq(target.booking_id, &mut tx)
            .await?;

        if is_latest_entry(target.seq, latest_seq) {
            return Err(ServiceError::LatestEntryProtected(proposal_id));
        }

        self.db_client
            .delete_proposal_tx(proposal_id, &mut tx)
            .await?;

        tx.commit().await?;

        self.notification_service
            .notify_proposal_deleted(&target, requester)
            .await?;

        Ok(())
    }

    /// Full negotiation history, most recent first.
    pub async fn get_history(
        &self,
        booking_id: Uuid,
    ) -> Result<Vec<ScheduleProposal>, ServiceError> {
        let proposals = self.db_client.get_proposals_by_booking(booking_id).await?;

        Ok(proposals)
    }

    /// The proposal a client should surface right now, if any.
    pub async fn get_active_negotiation(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<ScheduleProposal>, ServiceError> {
        let proposals = self.db_client.get_proposals_by_booking(booking_id).await?;

        Ok(derive_active_negotiation(&proposals).cloned())
    }

    /// Booking-level schedule summary as seen by `viewer`: negotiation state
    /// plus the confirmed terms when an accepted proposal is the most recent
    /// entry.
    pub async fn get_booking_schedule(
        &self,
        booking_id: Uuid,
        viewer: ParticipantRole,
    ) -> Result<(Booking, NegotiationState, Option<ScheduleProposal>), ServiceError> {
        let booking = self
            .db_client
            .get_booking_by_id(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        let proposals = self.db_client.get_proposals_by_booking(booking_id).await?;

        let state = derive_negotiation_state(&proposals, viewer);
        let confirmed = match state {
            NegotiationState::Confirmed => derive_confirmed_schedule(&proposals).cloned(),
            _ => None,
        };

        Ok((booking, state, confirmed))
    }
}
