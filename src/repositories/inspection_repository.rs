use sqlx::PgPool;
use uuid::Uuid;

use crate::models::inspection::{InspectionReport, InspectionType, ZoneStatuses};
use crate::utils::errors::AppResult;

pub struct InspectionRepository {
    pool: PgPool,
}

impl InspectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn booking_exists(&self, booking_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE id = $1)",
        )
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(
        &self,
        booking_id: Uuid,
        inspection_type: InspectionType,
        zones: &ZoneStatuses,
        notes: Option<String>,
        inspector_id: Uuid,
    ) -> AppResult<InspectionReport> {
        let report = sqlx::query_as::<_, InspectionReport>(
            r#"
            INSERT INTO inspection_reports (
                id, booking_id, inspection_type,
                front, rear, left_side, right_side, trunk, dashboard, seats, front_seats,
                notes, inspector_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(inspection_type)
        .bind(zones.front)
        .bind(zones.rear)
        .bind(zones.left)
        .bind(zones.right)
        .bind(zones.trunk)
        .bind(zones.dashboard)
        .bind(zones.seats)
        .bind(zones.front_seats)
        .bind(notes)
        .bind(inspector_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InspectionReport>> {
        let report = sqlx::query_as::<_, InspectionReport>(
            "SELECT * FROM inspection_reports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    /// Inspecciones de una reserva en orden de registro
    pub async fn find_by_booking(&self, booking_id: Uuid) -> AppResult<Vec<InspectionReport>> {
        let reports = sqlx::query_as::<_, InspectionReport>(
            "SELECT * FROM inspection_reports WHERE booking_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }
}
