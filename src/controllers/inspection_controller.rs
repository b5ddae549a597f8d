use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::inspection_dto::CreateInspectionRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::inspection::InspectionReport;
use crate::repositories::inspection_repository::InspectionRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::required;

pub struct InspectionController {
    repository: InspectionRepository,
}

impl InspectionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InspectionRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateInspectionRequest,
    ) -> AppResult<ApiResponse<InspectionReport>> {
        request.validate()?;
        let booking_id = required("booking_id", request.booking_id)?;
        let inspection_type = required("type", request.inspection_type)?;

        if !self.repository.booking_exists(booking_id).await? {
            return Err(not_found_error("Booking", &booking_id.to_string()));
        }

        let report = self
            .repository
            .create(booking_id, inspection_type, &request.zones, request.notes, user.user_id)
            .await?;

        let damaged = report.zones.damaged_zones();
        if !damaged.is_empty() {
            info!(
                "🔍 Inspección {:?} de la reserva {} con daños en: {}",
                inspection_type,
                booking_id,
                damaged.join(", ")
            );
        }

        Ok(ApiResponse::success_with_message(report, "Inspección registrada"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<InspectionReport> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Inspection", &id.to_string()))
    }
}
