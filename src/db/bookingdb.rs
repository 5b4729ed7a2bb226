// db/bookingdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::bookingmodel::*;

#[async_trait]
pub trait BookingExt {
    async fn create_booking(
        &self,
        customer_id: Uuid,
        installer_id: Option<Uuid>,
        address_line: String,
        city: String,
        postcode: String,
        tv_size_inches: i32,
        wall_type: WallType,
        notes: Option<String>,
    ) -> Result<Booking, Error>;

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, Error>;

    async fn get_bookings_by_customer(
        &self,
        customer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, Error>;

    async fn get_bookings_by_installer(
        &self,
        installer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, Error>;

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, Error>;
}

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking(
        &self,
        customer_id: Uuid,
        installer_id: Option<Uuid>,
        address_line: String,
        city: String,
        postcode: String,
        tv_size_inches: i32,
        wall_type: WallType,
        notes: Option<String>,
    ) -> Result<Booking, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
            (customer_id, installer_id, address_line, city, postcode, tv_size_inches, wall_type, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, customer_id, installer_id,
                address_line, city, postcode,
                tv_size_inches, wall_type, notes,
                status, created_at, updated_at
            "#,
        )
        .bind(customer_id)
        .bind(installer_id)
        .bind(address_line)
        .bind(city)
        .bind(postcode)
        .bind(tv_size_inches)
        .bind(wall_type)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, customer_id, installer_id,
                address_line, city, postcode,
                tv_size_inches, wall_type, notes,
                status, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_bookings_by_customer(
        &self,
        customer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, customer_id, installer_id,
                address_line, city, postcode,
                tv_size_inches, wall_type, notes,
                status, created_at, updated_at
            FROM bookings
            WHERE customer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bookings_by_installer(
        &self,
        installer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, customer_id, installer_id,
                address_line, city, postcode,
                tv_size_inches, wall_type, notes,
                status, created_at, updated_at
            FROM bookings
            WHERE installer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(installer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, customer_id, installer_id,
                address_line, city, postcode,
                tv_size_inches, wall_type, notes,
                status, created_at, updated_at
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
