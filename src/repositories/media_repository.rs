use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::media_dto::RegisterMediaRequest;
use crate::models::media::{Media, MediaRole, VehicleMedia};
use crate::utils::errors::AppResult;

pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Guardar los metadatos de un archivo ya subido
    pub async fn register(
        &self,
        request: RegisterMediaRequest,
        uploaded_by: Uuid,
    ) -> AppResult<Media> {
        let media = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (id, url, filename, mime_type, size_bytes, width, height, blur_data_url, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.url)
        .bind(request.filename)
        .bind(request.mime_type)
        .bind(request.size_bytes.unwrap_or(0))
        .bind(request.width)
        .bind(request.height)
        .bind(request.blur_data_url)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(media)
    }

    pub async fn exists(&self, media_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM media WHERE id = $1)",
        )
        .bind(media_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Asociar media a un vehículo; si ya existe la asociación se actualiza rol y orden
    pub async fn link(
        &self,
        vehicle_id: Uuid,
        media_id: Uuid,
        role: MediaRole,
        sort_order: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_media (vehicle_id, media_id, role, sort_order)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (vehicle_id, media_id)
            DO UPDATE SET role = EXCLUDED.role, sort_order = EXCLUDED.sort_order
            "#,
        )
        .bind(vehicle_id)
        .bind(media_id)
        .bind(role)
        .bind(sort_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Quitar una asociación; `false` si no existía
    pub async fn unlink(&self, vehicle_id: Uuid, media_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM vehicle_media WHERE vehicle_id = $1 AND media_id = $2",
        )
        .bind(vehicle_id)
        .bind(media_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<VehicleMedia>> {
        let media = sqlx::query_as::<_, VehicleMedia>(
            r#"
            SELECT vm.vehicle_id, vm.role, vm.sort_order, m.*
            FROM vehicle_media vm
            JOIN media m ON m.id = vm.media_id
            WHERE vm.vehicle_id = $1
            ORDER BY vm.sort_order ASC, vm.created_at ASC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(media)
    }
}
