use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "participant_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Customer,
    Installer,
}

impl ParticipantRole {
    pub fn to_str(&self) -> &str {
        match self {
            ParticipantRole::Customer => "customer",
            ParticipantRole::Installer => "installer",
        }
    }

    /// The role on the other side of the negotiation, i.e. whoever gets
    /// notified when this role acts.
    pub fn counterparty(&self) -> ParticipantRole {
        match self {
            ParticipantRole::Customer => ParticipantRole::Installer,
            ParticipantRole::Installer => ParticipantRole::Customer,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "time_slot", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn to_str(&self) -> &str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "proposal_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Declined,
}

impl ProposalStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Declined => "declined",
        }
    }

    /// Accepted and declined proposals can never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Accepted | ProposalStatus::Declined)
    }

    /// The only legal moves are pending into one of the terminal states.
    pub fn can_transition_to(&self, target: ProposalStatus) -> bool {
        !self.is_terminal() && target.is_terminal()
    }
}

/// Booking-level view of a negotiation, computed from the proposal history
/// on every read. Never stored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationState {
    Unscheduled,
    PendingResponse,
    AwaitingOtherParty,
    Confirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScheduleProposal {
    pub id: Uuid,
    pub seq: i64,
    pub booking_id: Uuid,
    pub proposed_date: NaiveDate,
    pub proposed_time_slot: Option<TimeSlot>,
    pub proposed_start_time: Option<NaiveTime>,
    pub proposed_end_time: Option<NaiveTime>,
    pub proposal_message: Option<String>,
    pub proposed_by: ParticipantRole,
    pub status: ProposalStatus,
    pub response_message: Option<String>,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
    pub responded_at: Option<DateTime<Utc>>,
}

/// The most recent entry of a booking's history. `seq` is assigned
/// monotonically at insert time, so it is also the tie-break when
/// timestamps collide.
pub fn latest_proposal(proposals: &[ScheduleProposal]) -> Option<&ScheduleProposal> {
    proposals.iter().max_by_key(|p| p.seq)
}

/// The single proposal most relevant to display: the latest accepted one if
/// it is also the most recent entry overall, otherwise the latest pending
/// one, otherwise none.
pub fn derive_active_negotiation(proposals: &[ScheduleProposal]) -> Option<&ScheduleProposal> {
    let latest = latest_proposal(proposals)?;
    if latest.status == ProposalStatus::Accepted {
        return Some(latest);
    }
    proposals
        .iter()
        .filter(|p| p.status == ProposalStatus::Pending)
        .max_by_key(|p| p.seq)
}

/// The confirmed schedule: the most recently created proposal whose status
/// is accepted. A later pending or declined proposal does not erase it, it
/// only reopens the negotiation.
pub fn derive_confirmed_schedule(proposals: &[ScheduleProposal]) -> Option<&ScheduleProposal> {
    proposals
        .iter()
        .filter(|p| p.status == ProposalStatus::Accepted)
        .max_by_key(|p| p.seq)
}

/// Booking-level negotiation state as seen by `viewer`. Pending proposals
/// authored by the other role are awaiting the viewer's response; the
/// viewer's own pending proposals are awaiting the counterparty.
pub fn derive_negotiation_state(
    proposals: &[ScheduleProposal],
    viewer: ParticipantRole,
) -> NegotiationState {
    let Some(latest) = latest_proposal(proposals) else {
        return NegotiationState::Unscheduled;
    };

    match latest.status {
        ProposalStatus::Accepted => NegotiationState::Confirmed,
        ProposalStatus::Declined => NegotiationState::Unscheduled,
        ProposalStatus::Pending => {
            if latest.proposed_by == viewer {
                NegotiationState::AwaitingOtherParty
            } else {
                NegotiationState::PendingResponse
            }
        }
    }
}

/// Deletion guard: the most recent entry of a booking's history must stay,
/// so the negotiation always keeps an auditable tail.
pub fn is_latest_entry(target_seq: i64, latest_seq: Option<i64>) -> bool {
    latest_seq.map_or(true, |latest| target_seq >= latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn proposal(
        seq: i64,
        proposed_by: ParticipantRole,
        status: ProposalStatus,
    ) -> ScheduleProposal {
        ScheduleProposal {
            id: Uuid::new_v4(),
            seq,
            booking_id: Uuid::new_v4(),
            proposed_date: NaiveDate::from_ymd_opt(2030, 6, 15).unwrap(),
            proposed_time_slot: Some(TimeSlot::Morning),
            proposed_start_time: None,
            proposed_end_time: None,
            proposal_message: None,
            proposed_by,
            status,
            response_message: None,
            created_at: Some(Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).unwrap()),
            responded_at: None,
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ProposalStatus::Pending.is_terminal());
        assert!(ProposalStatus::Accepted.is_terminal());
        assert!(ProposalStatus::Declined.is_terminal());
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(ProposalStatus::Pending.can_transition_to(ProposalStatus::Accepted));
        assert!(ProposalStatus::Pending.can_transition_to(ProposalStatus::Declined));
        assert!(!ProposalStatus::Accepted.can_transition_to(ProposalStatus::Declined));
        assert!(!ProposalStatus::Accepted.can_transition_to(ProposalStatus::Pending));
        assert!(!ProposalStatus::Declined.can_transition_to(ProposalStatus::Accepted));
    }

    #[test]
    fn test_active_negotiation_empty_history() {
        assert!(derive_active_negotiation(&[]).is_none());
    }

    #[test]
    fn test_active_negotiation_prefers_latest_pending() {
        // pending#1 by installer, declined#2, pending#3 by customer -> #3
        let history = vec![
            proposal(1, ParticipantRole::Installer, ProposalStatus::Pending),
            proposal(2, ParticipantRole::Installer, ProposalStatus::Declined),
            proposal(3, ParticipantRole::Customer, ProposalStatus::Pending),
        ];
        let active = derive_active_negotiation(&history).unwrap();
        assert_eq!(active.seq, 3);
        assert_eq!(active.proposed_by, ParticipantRole::Customer);
    }

    #[test]
    fn test_active_negotiation_accepted_when_most_recent() {
        let history = vec![
            proposal(1, ParticipantRole::Installer, ProposalStatus::Declined),
            proposal(2, ParticipantRole::Customer, ProposalStatus::Accepted),
        ];
        let active = derive_active_negotiation(&history).unwrap();
        assert_eq!(active.seq, 2);
        assert_eq!(active.status, ProposalStatus::Accepted);
    }

    #[test]
    fn test_reschedule_supersedes_accepted_schedule() {
        // An accepted proposal followed by a fresh pending one: the new
        // pending entry is the active negotiation, the accepted one stays
        // the confirmed schedule.
        let history = vec![
            proposal(1, ParticipantRole::Installer, ProposalStatus::Accepted),
            proposal(2, ParticipantRole::Installer, ProposalStatus::Pending),
        ];
        let active = derive_active_negotiation(&history).unwrap();
        assert_eq!(active.seq, 2);
        assert_eq!(active.status, ProposalStatus::Pending);

        let confirmed = derive_confirmed_schedule(&history).unwrap();
        assert_eq!(confirmed.seq, 1);
    }

    #[test]
    fn test_active_negotiation_falls_back_to_older_pending() {
        let history = vec![
            proposal(1, ParticipantRole::Customer, ProposalStatus::Pending),
            proposal(2, ParticipantRole::Installer, ProposalStatus::Declined),
        ];
        let active = derive_active_negotiation(&history).unwrap();
        assert_eq!(active.seq, 1);
    }

    #[test]
    fn test_confirmed_schedule_takes_most_recent_accepted() {
        let history = vec![
            proposal(1, ParticipantRole::Installer, ProposalStatus::Accepted),
            proposal(2, ParticipantRole::Customer, ProposalStatus::Declined),
            proposal(3, ParticipantRole::Customer, ProposalStatus::Accepted),
        ];
        assert_eq!(derive_confirmed_schedule(&history).unwrap().seq, 3);
    }

    #[test]
    fn test_seq_breaks_created_at_ties() {
        // Same timestamp on every row: insertion order decides.
        let history = vec![
            proposal(7, ParticipantRole::Customer, ProposalStatus::Pending),
            proposal(8, ParticipantRole::Installer, ProposalStatus::Pending),
        ];
        assert_eq!(latest_proposal(&history).unwrap().seq, 8);
        assert_eq!(derive_active_negotiation(&history).unwrap().seq, 8);
    }

    #[test]
    fn test_negotiation_state_is_viewer_relative() {
        let history = vec![proposal(1, ParticipantRole::Installer, ProposalStatus::Pending)];
        assert_eq!(
            derive_negotiation_state(&history, ParticipantRole::Customer),
            NegotiationState::PendingResponse
        );
        assert_eq!(
            derive_negotiation_state(&history, ParticipantRole::Installer),
            NegotiationState::AwaitingOtherParty
        );
    }

    #[test]
    fn test_negotiation_state_terminal_views() {
        assert_eq!(
            derive_negotiation_state(&[], ParticipantRole::Customer),
            NegotiationState::Unscheduled
        );

        let confirmed = vec![proposal(1, ParticipantRole::Installer, ProposalStatus::Accepted)];
        assert_eq!(
            derive_negotiation_state(&confirmed, ParticipantRole::Customer),
            NegotiationState::Confirmed
        );

        let declined = vec![proposal(1, ParticipantRole::Installer, ProposalStatus::Declined)];
        assert_eq!(
            derive_negotiation_state(&declined, ParticipantRole::Installer),
            NegotiationState::Unscheduled
        );
    }

    #[test]
    fn test_latest_entry_guard() {
        // Two entries: the older one may go, the newest may not.
        assert!(!is_latest_entry(1, Some(2)));
        assert!(is_latest_entry(2, Some(2)));
        // Sole remaining entry is by definition the latest.
        assert!(is_latest_entry(1, Some(1)));
    }
}
