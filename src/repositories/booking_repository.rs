use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::pagination::Pagination;
use crate::models::booking::{Booking, BookingListItem, NewBooking};
use crate::services::listing::{booking_count_query, booking_list_query, BookingFilters, SortSpec};
use crate::utils::errors::AppResult;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar la reserva con la copia de los datos de contacto
    pub async fn insert(
        conn: &mut PgConnection,
        booking: &NewBooking,
        customer_id: Uuid,
        operator_id: Uuid,
    ) -> AppResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, vehicle_id, user_id, customer_id,
                customer_name, customer_email, customer_phone, customer_license,
                start_date, end_date, daily_rate, total_days, total_amount, security_deposit,
                payment_method, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking.vehicle_id)
        .bind(operator_id)
        .bind(customer_id)
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_phone)
        .bind(&booking.customer_license)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.daily_rate)
        .bind(booking.total_days)
        .bind(booking.total_amount)
        .bind(booking.security_deposit)
        .bind(booking.payment_method)
        .bind(&booking.notes)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }

    pub async fn vehicle_exists(conn: &mut PgConnection, vehicle_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)",
        )
        .bind(vehicle_id)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Reservas de un cliente, de la más reciente a la más antigua
    pub async fn find_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE customer_id = $1 ORDER BY start_date DESC, id ASC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Página filtrada y el total bajo el mismo predicado
    pub async fn list(
        &self,
        filters: &BookingFilters,
        sort: SortSpec,
        pagination: Pagination,
    ) -> AppResult<(Vec<BookingListItem>, i64)> {
        let mut list_query = booking_list_query(filters, sort, pagination);
        let items = list_query
            .build_query_as::<BookingListItem>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query = booking_count_query(filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }
}
