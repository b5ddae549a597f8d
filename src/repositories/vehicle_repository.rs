use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::pagination::Pagination;
use crate::dto::vehicle_dto::UpdateVehicleRequest;
use crate::models::status::VehicleStatus;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleListItem, VehicleSummary};
use crate::repositories::status_history_repository::{insert_status, VehicleHistory};
use crate::services::listing::{vehicle_count_query, vehicle_list_query, SortSpec, VehicleFilters};
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta del vehículo con su primera entrada de historial (Available)
    pub async fn create(&self, vehicle: NewVehicle, created_by: Uuid) -> AppResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, brand, model, year, vin, license_plate, color,
                vehicle_type, transmission, fuel_type, seats, doors, baggage_capacity,
                has_air_conditioning, has_gps, has_bluetooth, has_backup_camera, has_child_seat,
                odometer
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.vin)
        .bind(vehicle.license_plate)
        .bind(vehicle.color)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.transmission)
        .bind(vehicle.fuel_type)
        .bind(vehicle.seats)
        .bind(vehicle.doors)
        .bind(vehicle.baggage_capacity)
        .bind(vehicle.has_air_conditioning)
        .bind(vehicle.has_gps)
        .bind(vehicle.has_bluetooth)
        .bind(vehicle.has_backup_camera)
        .bind(vehicle.has_child_seat)
        .bind(vehicle.odometer)
        .fetch_one(&mut *tx)
        .await?;

        insert_status::<VehicleHistory>(
            &mut tx,
            created.id,
            VehicleStatus::Available,
            Some(created_by),
            Some("Alta en flota".to_string()),
        )
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_summary(&self, id: Uuid) -> AppResult<Option<VehicleSummary>> {
        let summary = sqlx::query_as::<_, VehicleSummary>(
            "SELECT id, brand, model, year, license_plate FROM vehicles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Matrícula ya usada por otro vehículo
    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE upper(license_plate) = upper($1) AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(license_plate)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// VIN ya usado por otro vehículo
    pub async fn vin_exists(&self, vin: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE upper(vin) = upper($1) AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(vin)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Actualizar solo los campos presentes; `None` si el vehículo no existe
    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateVehicleRequest,
    ) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                vin = COALESCE($5, vin),
                license_plate = COALESCE($6, license_plate),
                color = COALESCE($7, color),
                vehicle_type = COALESCE($8, vehicle_type),
                transmission = COALESCE($9, transmission),
                fuel_type = COALESCE($10, fuel_type),
                seats = COALESCE($11, seats),
                doors = COALESCE($12, doors),
                baggage_capacity = COALESCE($13, baggage_capacity),
                has_air_conditioning = COALESCE($14, has_air_conditioning),
                has_gps = COALESCE($15, has_gps),
                has_bluetooth = COALESCE($16, has_bluetooth),
                has_backup_camera = COALESCE($17, has_backup_camera),
                has_child_seat = COALESCE($18, has_child_seat),
                odometer = COALESCE($19, odometer),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.brand.map(|v| v.trim().to_string()))
        .bind(changes.model.map(|v| v.trim().to_string()))
        .bind(changes.year)
        .bind(changes.vin.map(|v| v.to_uppercase()))
        .bind(changes.license_plate.map(|v| v.trim().to_uppercase()))
        .bind(changes.color)
        .bind(changes.vehicle_type)
        .bind(changes.transmission)
        .bind(changes.fuel_type)
        .bind(changes.seats)
        .bind(changes.doors)
        .bind(changes.baggage_capacity)
        .bind(changes.has_air_conditioning)
        .bind(changes.has_gps)
        .bind(changes.has_bluetooth)
        .bind(changes.has_backup_camera)
        .bind(changes.has_child_seat)
        .bind(changes.odometer)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Página filtrada y el total bajo el mismo predicado
    pub async fn list(
        &self,
        filters: &VehicleFilters,
        sort: SortSpec,
        pagination: Pagination,
    ) -> AppResult<(Vec<VehicleListItem>, i64)> {
        let mut list_query = vehicle_list_query(filters, sort, pagination);
        let items = list_query
            .build_query_as::<VehicleListItem>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query = vehicle_count_query(filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }
}
