//! Modelo de Booking
//!
//! Una reserva guarda una copia de los datos de contacto del cliente en el
//! momento de reservar, además de la referencia opcional a `customers`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::status::{serialize_current_status, BookingStatus};

/// Método de pago - mapea al ENUM payment_method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
}

/// Booking principal - mapea a la tabla bookings
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_license: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub daily_rate: Decimal,
    pub total_days: i32,
    pub total_amount: Decimal,
    pub security_deposit: Decimal,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// `daily_rate * total_days`; el total enviado por el cliente no se recalcula
    pub fn expected_total(&self) -> Decimal {
        self.daily_rate * Decimal::from(self.total_days)
    }
}

/// Datos validados del asistente de reservas
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub vehicle_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_license: String,
    pub customer_address: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub daily_rate: Decimal,
    pub total_days: i32,
    pub total_amount: Decimal,
    pub security_deposit: Decimal,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl NewBooking {
    pub fn expected_total(&self) -> Decimal {
        self.daily_rate * Decimal::from(self.total_days)
    }
}

/// Fila del listado: reserva + vehículo + último estado
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_license_plate: String,
    #[serde(serialize_with = "serialize_current_status")]
    pub current_status: Option<BookingStatus>,
    pub status_changed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_total() {
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            customer_id: None,
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            customer_phone: "600123456".to_string(),
            customer_license: "B-123".to_string(),
            start_date: now,
            end_date: now,
            daily_rate: Decimal::new(4550, 2),
            total_days: 3,
            total_amount: Decimal::new(13650, 2),
            security_deposit: Decimal::ZERO,
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(booking.expected_total(), Decimal::new(13650, 2));
    }
}
