use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{bookingmodel::*, negotiationmodel::ParticipantRole};

//Booking DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingDto {
    pub customer_id: Uuid,

    pub installer_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200, message = "Address is required"))]
    pub address_line: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 20, message = "Postcode is required"))]
    pub postcode: String,

    #[validate(range(min = 19, max = 120, message = "TV size must be between 19 and 120 inches"))]
    pub tv_size_inches: i32,

    pub wall_type: WallType,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListBookingsDto {
    pub role: ParticipantRole,

    pub user_id: Uuid,

    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub status: String,
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
}
