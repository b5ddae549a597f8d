//! Historial de estados append-only
//!
//! Vehículos y reservas comparten el mismo mecanismo: nunca se actualiza ni
//! se borra una entrada, y el estado actual es la entrada más reciente.

use std::marker::PhantomData;

use sqlx::{Decode, Encode, PgConnection, PgPool, Postgres, Type};
use uuid::Uuid;

use crate::models::status::{BookingStatus, StatusEntry, VehicleStatus};
use crate::utils::errors::{not_found_error, AppResult};

/// Tabla de historial asociada a una entidad
pub trait StatusHistory: Send + Sync + 'static {
    type Status: for<'r> Decode<'r, Postgres>
        + for<'q> Encode<'q, Postgres>
        + Type<Postgres>
        + Copy
        + Send
        + Sync
        + Unpin
        + 'static;

    const HISTORY_TABLE: &'static str;
    const ENTITY_TABLE: &'static str;
    const ENTITY_COLUMN: &'static str;
    /// Nombre usado en los mensajes de error
    const LABEL: &'static str;
}

pub struct VehicleHistory;

impl StatusHistory for VehicleHistory {
    type Status = VehicleStatus;
    const HISTORY_TABLE: &'static str = "vehicle_status_history";
    const ENTITY_TABLE: &'static str = "vehicles";
    const ENTITY_COLUMN: &'static str = "vehicle_id";
    const LABEL: &'static str = "Vehicle";
}

pub struct BookingHistory;

impl StatusHistory for BookingHistory {
    type Status = BookingStatus;
    const HISTORY_TABLE: &'static str = "booking_status_history";
    const ENTITY_TABLE: &'static str = "bookings";
    const ENTITY_COLUMN: &'static str = "booking_id";
    const LABEL: &'static str = "Booking";
}

fn select_columns<H: StatusHistory>() -> String {
    format!(
        "id, seq, {} AS entity_id, status, note, changed_by, changed_at",
        H::ENTITY_COLUMN
    )
}

/// Comprobar que la entidad existe
pub async fn entity_exists<H: StatusHistory>(
    conn: &mut PgConnection,
    entity_id: Uuid,
) -> AppResult<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", H::ENTITY_TABLE);
    let exists = sqlx::query_scalar::<_, bool>(&sql)
        .bind(entity_id)
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

/// Insertar una entrada en la conexión dada (normalmente una transacción)
///
/// `clock_timestamp()` avanza dentro de la transacción, así que dos entradas
/// de la misma transacción no comparten marca de tiempo; `seq` desempata igualmente.
pub async fn insert_status<H: StatusHistory>(
    conn: &mut PgConnection,
    entity_id: Uuid,
    status: H::Status,
    changed_by: Option<Uuid>,
    note: Option<String>,
) -> AppResult<StatusEntry<H::Status>> {
    let sql = format!(
        "INSERT INTO {table} (id, {col}, status, note, changed_by, changed_at) \
         VALUES ($1, $2, $3, $4, $5, clock_timestamp()) \
         RETURNING {columns}",
        table = H::HISTORY_TABLE,
        col = H::ENTITY_COLUMN,
        columns = select_columns::<H>(),
    );

    let entry = sqlx::query_as::<_, StatusEntry<H::Status>>(&sql)
        .bind(Uuid::new_v4())
        .bind(entity_id)
        .bind(status)
        .bind(note)
        .bind(changed_by)
        .fetch_one(conn)
        .await?;

    Ok(entry)
}

/// Repositorio genérico de historial
pub struct StatusHistoryRepository<H: StatusHistory> {
    pool: PgPool,
    _history: PhantomData<H>,
}

impl<H: StatusHistory> StatusHistoryRepository<H> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _history: PhantomData,
        }
    }

    /// Añadir una entrada; cualquier transición es válida
    pub async fn append(
        &self,
        entity_id: Uuid,
        status: H::Status,
        changed_by: Uuid,
        note: Option<String>,
    ) -> AppResult<StatusEntry<H::Status>> {
        let mut conn = self.pool.acquire().await?;

        if !entity_exists::<H>(&mut conn, entity_id).await? {
            return Err(not_found_error(H::LABEL, &entity_id.to_string()));
        }

        insert_status::<H>(&mut conn, entity_id, status, Some(changed_by), note).await
    }

    /// Estado actual: `None` si la entidad no tiene historial
    pub async fn current_status(&self, entity_id: Uuid) -> AppResult<Option<H::Status>> {
        let sql = format!(
            "SELECT status FROM {} WHERE {} = $1 ORDER BY changed_at DESC, seq DESC LIMIT 1",
            H::HISTORY_TABLE,
            H::ENTITY_COLUMN
        );

        let status = sqlx::query_scalar::<_, H::Status>(&sql)
            .bind(entity_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(status)
    }

    /// Historial completo, del más reciente al más antiguo
    pub async fn history(&self, entity_id: Uuid) -> AppResult<Vec<StatusEntry<H::Status>>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY changed_at DESC, seq DESC",
            select_columns::<H>(),
            H::HISTORY_TABLE,
            H::ENTITY_COLUMN
        );

        let entries = sqlx::query_as::<_, StatusEntry<H::Status>>(&sql)
            .bind(entity_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }
}
