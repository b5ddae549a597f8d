use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::media_dto::LinkVehicleMediaRequest;
use crate::dto::pagination::{Paginated, Pagination};
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, UpdateVehicleStatusRequest, VehicleDetailResponse,
    VehicleListQuery,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::media::VehicleMedia;
use crate::models::status::{latest_status, VehicleStatusEntry};
use crate::models::vehicle::{Vehicle, VehicleListItem};
use crate::repositories::media_repository::MediaRepository;
use crate::repositories::status_history_repository::{StatusHistoryRepository, VehicleHistory};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::listing::{resolve_sort, VehicleFilters, VEHICLE_SORT_COLUMNS};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::{parse_optional_enum, required};

pub struct VehicleController {
    repository: VehicleRepository,
    history: StatusHistoryRepository<VehicleHistory>,
    media: MediaRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            history: StatusHistoryRepository::new(pool.clone()),
            media: MediaRepository::new(pool),
        }
    }

    pub async fn list(&self, query: VehicleListQuery) -> AppResult<Paginated<VehicleListItem>> {
        let filters = VehicleFilters {
            search: query.search,
            status: parse_optional_enum("status", query.status.as_deref())?,
            vehicle_type: parse_optional_enum("vehicleType", query.vehicle_type.as_deref())?,
            fuel_type: parse_optional_enum("fuelType", query.fuel_type.as_deref())?,
            transmission: parse_optional_enum("transmission", query.transmission.as_deref())?,
        };
        let sort = resolve_sort(
            VEHICLE_SORT_COLUMNS,
            query.sort_by.as_deref(),
            query.sort_dir.as_deref(),
        );
        let pagination = Pagination::from_raw(query.page.as_deref(), query.page_size.as_deref());

        let (items, total) = self.repository.list(&filters, sort, pagination).await?;
        Ok(Paginated::new(items, total, pagination))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        user.require_admin("crear vehículos")?;
        request.validate()?;
        let vehicle = request.into_new_vehicle()?;

        if self.repository.license_plate_exists(&vehicle.license_plate, None).await? {
            return Err(conflict_error("Vehicle", "licensePlate", &vehicle.license_plate));
        }
        if self.repository.vin_exists(&vehicle.vin, None).await? {
            return Err(conflict_error("Vehicle", "vin", &vehicle.vin));
        }

        let created = self.repository.create(vehicle, user.user_id).await?;
        info!("🚗 Vehículo {} ({}) dado de alta", created.id, created.license_plate);

        Ok(ApiResponse::success_with_message(
            created,
            "Vehículo creado exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleDetailResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let status_history = self.history.history(id).await?;
        let media = self.media.find_by_vehicle(id).await?;

        Ok(VehicleDetailResponse {
            current_status: latest_status(&status_history),
            vehicle,
            status_history,
            media,
        })
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        user.require_admin("editar vehículos")?;
        request.validate()?;

        if let Some(plate) = request.license_plate.as_deref() {
            if self.repository.license_plate_exists(plate.trim(), Some(id)).await? {
                return Err(conflict_error("Vehicle", "licensePlate", plate));
            }
        }
        if let Some(vin) = request.vin.as_deref() {
            if self.repository.vin_exists(vin, Some(id)).await? {
                return Err(conflict_error("Vehicle", "vin", vin));
            }
        }

        let vehicle = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente",
        ))
    }

    /// Añadir una entrada al historial; cualquier transición es válida
    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleStatusRequest,
    ) -> AppResult<ApiResponse<VehicleStatusEntry>> {
        request.validate()?;
        let status = required("status", request.status)?;

        let entry = self.history.append(id, status, user.user_id, request.note).await?;
        info!("🔧 Vehículo {} -> {:?}", id, entry.status);

        Ok(ApiResponse::success_with_message(entry, "Estado actualizado"))
    }

    pub async fn list_media(&self, id: Uuid) -> AppResult<Vec<VehicleMedia>> {
        self.ensure_exists(id).await?;
        self.media.find_by_vehicle(id).await
    }

    pub async fn link_media(
        &self,
        id: Uuid,
        request: LinkVehicleMediaRequest,
    ) -> AppResult<ApiResponse<Vec<VehicleMedia>>> {
        request.validate()?;
        let media_id = required("media_id", request.media_id)?;

        self.ensure_exists(id).await?;
        if !self.media.exists(media_id).await? {
            return Err(not_found_error("Media", &media_id.to_string()));
        }

        self.media
            .link(id, media_id, request.role, request.sort_order.unwrap_or(0))
            .await?;

        let media = self.media.find_by_vehicle(id).await?;
        Ok(ApiResponse::success_with_message(media, "Imagen asociada al vehículo"))
    }

    pub async fn unlink_media(&self, id: Uuid, media_id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.media.unlink(id, media_id).await? {
            return Err(not_found_error("VehicleMedia", &format!("{}/{}", id, media_id)));
        }
        Ok(ApiResponse::message_only("Imagen desvinculada del vehículo"))
    }

    async fn ensure_exists(&self, id: Uuid) -> AppResult<()> {
        match self.repository.find_summary(id).await? {
            Some(_) => Ok(()),
            None => Err(not_found_error("Vehicle", &id.to_string())),
        }
    }
}
