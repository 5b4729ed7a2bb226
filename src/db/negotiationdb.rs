// db/negotiationdb.rs
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::negotiationmodel::*;

#[async_trait]
pub trait NegotiationExt {
    async fn create_proposal(
        &self,
        booking_id: Uuid,
        proposed_date: NaiveDate,
        proposed_time_slot: Option<TimeSlot>,
        proposed_start_time: Option<NaiveTime>,
        proposed_end_time: Option<NaiveTime>,
        proposal_message: Option<String>,
        proposed_by: ParticipantRole,
    ) -> Result<ScheduleProposal, Error>;

    async fn get_proposal_by_id(
        &self,
        proposal_id: Uuid,
    ) -> Result<Option<ScheduleProposal>, Error>;

    async fn get_proposals_by_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Vec<ScheduleProposal>, Error>;

    // Optimistic transition: the status check runs inside the UPDATE itself,
    // so a racing accept/decline leaves exactly one winner. Returns None when
    // the row is missing, already resolved, or authored by the responder.
    async fn resolve_pending_proposal(
        &self,
        proposal_id: Uuid,
        responder: ParticipantRole,
        status: ProposalStatus,
        response_message: Option<String>,
    ) -> Result<Option<ScheduleProposal>, Error>;

    async fn get_proposal_for_update(
        &self,
        proposal_id: Uuid,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Option<ScheduleProposal>, Error>;

    async fn latest_proposal_seq(
        &self,
        booking_id: Uuid,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Option<i64>, Error>;

    async fn delete_proposal_tx(
        &self,
        proposal_id: Uuid,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), Error>;
}

#[async_trait]
impl NegotiationExt for DBClient {
    async fn create_proposal(
        &self,
        booking_id: Uuid,
        proposed_date: NaiveDate,
        proposed_time_slot: Option<TimeSlot>,
        proposed_start_time: Option<NaiveTime>,
        proposed_end_time: Option<NaiveTime>,
        proposal_message: Option<String>,
        proposed_by: ParticipantRole,
    ) -> Result<ScheduleProposal, Error> {
        sqlx::query_as::<_, ScheduleProposal>(
            r#"
            INSERT INTO schedule_proposals
            (booking_id, proposed_date, proposed_time_slot, proposed_start_time, proposed_end_time, proposal_message, proposed_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, seq, booking_id,
                proposed_date, proposed_time_slot,
                proposed_start_time, proposed_end_time,
                proposal_message, proposed_by,
                status, response_message,
                created_at, responded_at
            "#,
        )
        .bind(booking_id)
        .bind(proposed_date)
        .bind(proposed_time_slot)
        .bind(proposed_start_time)
        .bind(proposed_end_time)
        .bind(proposal_message)
        .bind(proposed_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_proposal_by_id(
        &self,
        proposal_id: Uuid,
    ) -> Result<Option<ScheduleProposal>, Error> {
        sqlx::query_as::<_, ScheduleProposal>(
            r#"
            SELECT
                id, seq, booking_id,
                proposed_date, proposed_time_slot,
                proposed_start_time, proposed_end_time,
                proposal_message, proposed_by,
                status, response_message,
                created_at, responded_at
            FROM schedule_proposals
            WHERE id = $1
            "#,
        )
        .bind(proposal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_proposals_by_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Vec<ScheduleProposal>, Error> {
        sqlx::query_as::<_, ScheduleProposal>(
            r#"
            SELECT
                id, seq, booking_id,
                proposed_date, proposed_time_slot,
                proposed_start_time, proposed_end_time,
                proposal_message, proposed_by,
                status, response_message,
                created_at, responded_at
            FROM schedule_proposals
            WHERE booking_id = $1
            ORDER BY seq DESC
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn resolve_pending_proposal(
        &self,
        proposal_id: Uuid,
        responder: ParticipantRole,
        status: ProposalStatus,
        response_message: Option<String>,
    ) -> Result<Option<ScheduleProposal>, Error> {
        sqlx::query_as::<_, ScheduleProposal>(
            r#"
            UPDATE schedule_proposals
            SET status = $2, response_message = $3, responded_at = NOW()
            WHERE id = $1 AND status = 'pending' AND proposed_by <> $4
            RETURNING
                id, seq, booking_id,
                proposed_date, proposed_time_slot,
                proposed_start_time, proposed_end_time,
                proposal_message, proposed_by,
                status, response_message,
                created_at, responded_at
            "#,
        )
        .bind(proposal_id)
        .bind(status)
        .bind(response_message)
        .bind(responder)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_proposal_for_update(
        &self,
        proposal_id: Uuid,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Option<ScheduleProposal>, Error> {
        sqlx::query_as::<_, ScheduleProposal>(
            r#"
            SELECT
                id, seq, booking_id,
                proposed_date, proposed_time_slot,
                proposed_start_time, proposed_end_time,
                proposal_message, proposed_by,
                status, response_message,
                created_at, responded_at
            FROM schedule_proposals
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(proposal_id)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn latest_proposal_seq(
        &self,
        booking_id: Uuid,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Option<i64>, Error> {
        let latest: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT MAX(seq) FROM schedule_proposals WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(latest)
    }

    async fn delete_proposal_tx(
        &self,
        proposal_id: Uuid,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM schedule_proposals WHERE id = $1
            "#,
        )
        .bind(proposal_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
