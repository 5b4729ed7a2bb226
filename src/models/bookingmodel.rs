use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "wall_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WallType {
    Drywall,
    Brick,
    Concrete,
    Plaster,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub installer_id: Option<Uuid>,
    pub address_line: String,
    pub city: String,
    pub postcode: String,
    pub tv_size_inches: i32,
    pub wall_type: WallType,
    pub notes: Option<String>,
    pub status: Option<BookingStatus>,     // Database has DEFAULT 'pending', can be NULL
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
    pub updated_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
}

impl Booking {
    /// Cancelled bookings accept no further schedule proposals.
    pub fn is_cancelled(&self) -> bool {
        self.status == Some(BookingStatus::Cancelled)
    }
}
