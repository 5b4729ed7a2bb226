use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::bookingdb::BookingExt,
    dtos::{bookingdtos::*, negotiationdtos::ApiResponse},
    error::HttpError,
    models::{bookingmodel::BookingStatus, negotiationmodel::ParticipantRole},
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route("/:booking_id", get(get_booking))
        .route("/:booking_id/cancel", put(cancel_booking))
        // Negotiation reads are booking-scoped
        .route(
            "/:booking_id/negotiations",
            get(crate::handler::negotiation::get_negotiation_history),
        )
        .route(
            "/:booking_id/negotiations/active",
            get(crate::handler::negotiation::get_active_negotiation),
        )
        .route(
            "/:booking_id/schedule",
            get(crate::handler::negotiation::get_booking_schedule),
        )
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .db_client
        .create_booking(
            body.customer_id,
            body.installer_id,
            body.address_line,
            body.city,
            body.postcode,
            body.tv_size_inches,
            body.wall_type,
            body.notes,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Booking created successfully", booking)),
    ))
}

pub async fn get_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Booking {} not found", booking_id)))?;

    Ok(Json(ApiResponse::success("Booking found", booking)))
}

pub async fn list_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(params): Query<ListBookingsDto>,
) -> Result<impl IntoResponse, HttpError> {
    params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(20);
    let offset = ((page - 1) * limit) as i64;

    let bookings = match params.role {
        ParticipantRole::Customer => {
            app_state
                .db_client
                .get_bookings_by_customer(params.user_id, limit as i64, offset)
                .await
        }
        ParticipantRole::Installer => {
            app_state
                .db_client
                .get_bookings_by_installer(params.user_id, limit as i64, offset)
                .await
        }
    }
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaginatedResponse {
        status: "success".to_string(),
        data: bookings,
        page,
        limit,
    }))
}

pub async fn cancel_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Booking {} not found", booking_id)))?;

    if booking.status == Some(BookingStatus::Completed) {
        return Err(HttpError::conflict(
            "Completed bookings cannot be cancelled",
        ));
    }

    if booking.is_cancelled() {
        return Err(HttpError::conflict("Booking is already cancelled"));
    }

    let cancelled = app_state
        .db_client
        .update_booking_status(booking_id, BookingStatus::Cancelled)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Booking cancelled successfully",
        cancelled,
    )))
}
