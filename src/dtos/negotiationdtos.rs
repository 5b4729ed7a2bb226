use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::negotiationmodel::*;

//Proposal DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SubmitProposalDto {
    pub booking_id: Uuid,

    pub role: ParticipantRole,

    pub proposed_date: NaiveDate,

    pub time_slot: Option<TimeSlot>,

    pub start_time: Option<NaiveTime>,

    pub end_time: Option<NaiveTime>,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ProposalDecision {
    Accept,
    Decline,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RespondProposalDto {
    pub role: ParticipantRole,

    pub decision: ProposalDecision,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

impl RespondProposalDto {
    /// Accepting needs no explanation, declining always does.
    pub fn require_decline_reason(&self) -> Result<(), String> {
        if self.decision == ProposalDecision::Decline
            && self
                .message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .is_none()
        {
            return Err("Declining a proposal requires a reason".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleQueryDto {
    pub role: ParticipantRole,
}

//Response DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct NegotiationHistoryDto {
    pub status: String,
    pub booking_id: Uuid,
    pub count: usize,
    pub proposals: Vec<ScheduleProposal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveNegotiationDto {
    pub status: String,
    pub booking_id: Uuid,
    pub proposal: Option<ScheduleProposal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmedScheduleDto {
    pub proposal_id: Uuid,
    pub proposed_date: NaiveDate,
    pub time_slot: Option<TimeSlot>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub agreed_at: Option<DateTime<Utc>>,
}

impl ConfirmedScheduleDto {
    pub fn from_proposal(proposal: &ScheduleProposal) -> Self {
        ConfirmedScheduleDto {
            proposal_id: proposal.id,
            proposed_date: proposal.proposed_date,
            time_slot: proposal.proposed_time_slot,
            start_time: proposal.proposed_start_time,
            end_time: proposal.proposed_end_time,
            agreed_at: proposal.responded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingScheduleDto {
    pub status: String,
    pub booking: crate::models::bookingmodel::Booking,
    pub negotiation_state: NegotiationState,
    pub confirmed: Option<ConfirmedScheduleDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(decision: ProposalDecision, message: Option<&str>) -> RespondProposalDto {
        RespondProposalDto {
            role: ParticipantRole::Customer,
            decision,
            message: message.map(|m| m.to_string()),
        }
    }

    #[test]
    fn test_decline_without_reason_is_rejected() {
        assert!(respond(ProposalDecision::Decline, None)
            .require_decline_reason()
            .is_err());
        assert!(respond(ProposalDecision::Decline, Some(""))
            .require_decline_reason()
            .is_err());
        assert!(respond(ProposalDecision::Decline, Some("   "))
            .require_decline_reason()
            .is_err());
    }

    #[test]
    fn test_decline_with_reason_passes() {
        assert!(respond(ProposalDecision::Decline, Some("not available"))
            .require_decline_reason()
            .is_ok());
    }

    #[test]
    fn test_accept_needs_no_reason() {
        assert!(respond(ProposalDecision::Accept, None)
            .require_decline_reason()
            .is_ok());
        assert!(respond(ProposalDecision::Accept, Some("works for me"))
            .require_decline_reason()
            .is_ok());
    }
}
