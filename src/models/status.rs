//! Estados de vehículos y reservas
//!
//! El estado actual nunca se guarda en la fila del vehículo o de la reserva:
//! se deriva de la entrada más reciente del historial (append-only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::{postgres::PgRow, Decode, FromRow, Postgres, Row, Type};
use uuid::Uuid;

/// Valor que se devuelve cuando una entidad no tiene historial
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
}

/// Estado de la reserva - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckoutStarted,
    CheckoutCompleted,
    Active,
    Completed,
    Cancelled,
}

/// Entrada inmutable del historial de estados
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry<S> {
    pub id: Uuid,
    #[serde(skip)]
    pub seq: i64,
    pub entity_id: Uuid,
    pub status: S,
    pub note: Option<String>,
    pub changed_by: Option<Uuid>,
    pub changed_at: DateTime<Utc>,
}

pub type VehicleStatusEntry = StatusEntry<VehicleStatus>;
pub type BookingStatusEntry = StatusEntry<BookingStatus>;

impl<'r, S> FromRow<'r, PgRow> for StatusEntry<S>
where
    S: Decode<'r, Postgres> + Type<Postgres>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            seq: row.try_get("seq")?,
            entity_id: row.try_get("entity_id")?,
            status: row.try_get("status")?,
            note: row.try_get("note")?,
            changed_by: row.try_get("changed_by")?,
            changed_at: row.try_get("changed_at")?,
        })
    }
}

/// Estado actual calculado en memoria: la entrada con `changed_at` más reciente
/// (empates resueltos por orden de inserción)
pub fn latest_status<S: Clone>(entries: &[StatusEntry<S>]) -> Option<S> {
    entries
        .iter()
        .max_by(|a, b| a.changed_at.cmp(&b.changed_at).then(a.seq.cmp(&b.seq)))
        .map(|entry| entry.status.clone())
}

/// Serializa `None` como "Unknown"
pub fn serialize_current_status<S, Ser>(
    value: &Option<S>,
    serializer: Ser,
) -> Result<Ser::Ok, Ser::Error>
where
    S: Serialize,
    Ser: Serializer,
{
    match value {
        Some(status) => status.serialize(serializer),
        None => serializer.serialize_str(UNKNOWN_STATUS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entry<S>(status: S, minutes: i64, seq: i64) -> StatusEntry<S> {
        StatusEntry {
            id: Uuid::new_v4(),
            seq,
            entity_id: Uuid::nil(),
            status,
            note: None,
            changed_by: None,
            changed_at: Utc.timestamp_opt(0, 0).unwrap() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_latest_status_empty_is_none() {
        let entries: Vec<VehicleStatusEntry> = vec![];
        assert_eq!(latest_status(&entries), None);
    }

    #[test]
    fn test_latest_status_uses_max_timestamp_not_position() {
        let entries = vec![
            entry(VehicleStatus::Maintenance, 30, 2),
            entry(VehicleStatus::Available, 10, 1),
        ];
        assert_eq!(latest_status(&entries), Some(VehicleStatus::Maintenance));
    }

    #[test]
    fn test_latest_status_tie_broken_by_sequence() {
        let entries = vec![
            entry(BookingStatus::Pending, 5, 1),
            entry(BookingStatus::Confirmed, 5, 2),
        ];
        assert_eq!(latest_status(&entries), Some(BookingStatus::Confirmed));
    }

    #[test]
    fn test_any_transition_is_accepted() {
        // Completed -> Pending es válido: no hay máquina de estados restrictiva
        let entries = vec![
            entry(BookingStatus::Completed, 1, 1),
            entry(BookingStatus::Pending, 2, 2),
        ];
        assert_eq!(latest_status(&entries), Some(BookingStatus::Pending));
    }

    #[test]
    fn test_serialize_current_status() {
        #[derive(Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_current_status")]
            status: Option<VehicleStatus>,
        }

        let known = serde_json::to_value(Wrapper { status: Some(VehicleStatus::Rented) }).unwrap();
        assert_eq!(known["status"], "Rented");

        let unknown = serde_json::to_value(Wrapper { status: None }).unwrap();
        assert_eq!(unknown["status"], UNKNOWN_STATUS);
    }

    #[test]
    fn test_booking_status_json_names() {
        let value = serde_json::to_value(BookingStatus::CheckoutCompleted).unwrap();
        assert_eq!(value, "CheckoutCompleted");
    }
}
