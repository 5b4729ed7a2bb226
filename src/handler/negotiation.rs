use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{dtos::negotiationdtos::*, error::HttpError, AppState};

pub fn negotiation_handler() -> Router {
    Router::new()
        .route("/", post(submit_proposal))
        .route("/:proposal_id/respond", patch(respond_to_proposal))
        .route("/:proposal_id", delete(delete_proposal))
}

pub async fn submit_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SubmitProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let proposal = app_state.negotiation_service.submit_proposal(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Proposal submitted successfully",
            proposal,
        )),
    ))
}

pub async fn respond_to_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(proposal_id): Path<Uuid>,
    Json(body): Json<RespondProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let proposal = app_state
        .negotiation_service
        .respond_to_proposal(proposal_id, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Response recorded successfully",
        proposal,
    )))
}

pub async fn delete_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(proposal_id): Path<Uuid>,
    Query(params): Query<RoleQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .negotiation_service
        .delete_proposal(proposal_id, params.role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_negotiation_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let proposals = app_state.negotiation_service.get_history(booking_id).await?;

    Ok(Json(NegotiationHistoryDto {
        status: "success".to_string(),
        booking_id,
        count: proposals.len(),
        proposals,
    }))
}

pub async fn get_active_negotiation(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let proposal = app_state
        .negotiation_service
        .get_active_negotiation(booking_id)
        .await?;

    Ok(Json(ActiveNegotiationDto {
        status: "success".to_string(),
        booking_id,
        proposal,
    }))
}

pub async fn get_booking_schedule(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Query(params): Query<RoleQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (booking, state, confirmed) = app_state
        .negotiation_service
        .get_booking_schedule(booking_id, params.role)
        .await?;

    Ok(Json(BookingScheduleDto {
        status: "success".to_string(),
        booking,
        negotiation_state: state,
        confirmed: confirmed.as_ref().map(ConfirmedScheduleDto::from_proposal),
    }))
}
