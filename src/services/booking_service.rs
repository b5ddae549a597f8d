//! Flujo de creación de reservas
//!
//! Cliente, reserva y estado inicial se escriben en una única transacción.
//! Si algo falla antes del commit la transacción se descarta y no queda
//! ninguna fila a medias.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::CreateBookingRequest;
use crate::models::booking::{Booking, NewBooking};
use crate::models::customer::{ContactIdentity, Customer};
use crate::models::status::BookingStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::status_history_repository::{insert_status, BookingHistory};
use crate::utils::errors::{not_found_error, AppResult};

/// Nota fija de la primera entrada del historial
pub const BOOKING_CREATED_NOTE: &str = "Reserva creada";

pub struct BookingService {
    pool: PgPool,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una reserva desde el asistente
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
        operator_id: Uuid,
    ) -> AppResult<Booking> {
        // Validación completa antes de tocar la base de datos
        request.validate()?;
        let booking = request.into_new_booking()?;

        if booking.total_amount != booking.expected_total() {
            warn!(
                "⚠️ totalAmount {} no coincide con dailyRate x totalDays = {} (vehículo {})",
                booking.total_amount,
                booking.expected_total(),
                booking.vehicle_id
            );
        }

        let mut tx = self.pool.begin().await?;

        if !BookingRepository::vehicle_exists(&mut tx, booking.vehicle_id).await? {
            return Err(not_found_error("Vehicle", &booking.vehicle_id.to_string()));
        }

        let customer = upsert_customer(&mut tx, &booking).await?;
        let created = BookingRepository::insert(&mut tx, &booking, customer.id, operator_id).await?;

        insert_status::<BookingHistory>(
            &mut tx,
            created.id,
            BookingStatus::Pending,
            Some(operator_id),
            Some(BOOKING_CREATED_NOTE.to_string()),
        )
        .await?;

        tx.commit().await?;

        info!(
            "📝 Reserva {} creada para el cliente {} ({} alquileres)",
            created.id, customer.id, customer.total_rentals
        );
        Ok(created)
    }
}

/// Reutilizar el cliente que coincide o crear uno nuevo con un alquiler
async fn upsert_customer(
    conn: &mut sqlx::PgConnection,
    booking: &NewBooking,
) -> AppResult<Customer> {
    let identity = ContactIdentity {
        email: &booking.customer_email,
        phone: &booking.customer_phone,
        license_number: &booking.customer_license,
    };

    match CustomerRepository::find_matching(conn, &identity).await? {
        Some(existing) => {
            CustomerRepository::register_rental(conn, existing.id, booking.start_date).await
        }
        None => {
            CustomerRepository::insert(
                conn,
                &booking.customer_name,
                &identity,
                booking.customer_address.as_deref(),
                1,
                Some(booking.start_date),
            )
            .await
        }
    }
}
