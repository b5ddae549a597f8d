use chrono::Duration;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::booking_dto::{
    BookingDetailResponse, BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::pagination::{Paginated, Pagination};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::BookingListItem;
use crate::models::status::{latest_status, BookingStatusEntry};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::inspection_repository::InspectionRepository;
use crate::repositories::status_history_repository::{BookingHistory, StatusHistoryRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::booking_service::BookingService;
use crate::services::listing::{resolve_sort, BookingFilters, BOOKING_SORT_COLUMNS};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{parse_date_filter, parse_optional_enum, required};

pub struct BookingController {
    repository: BookingRepository,
    history: StatusHistoryRepository<BookingHistory>,
    inspections: InspectionRepository,
    vehicles: VehicleRepository,
    service: BookingService,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool.clone()),
            history: StatusHistoryRepository::new(pool.clone()),
            inspections: InspectionRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            service: BookingService::new(pool),
        }
    }

    pub async fn list(&self, query: BookingListQuery) -> AppResult<Paginated<BookingListItem>> {
        let filters = booking_filters(&query)?;
        let sort = resolve_sort(
            BOOKING_SORT_COLUMNS,
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
        request: CreateBookingRequest,
    ) -> AppResult<ApiResponse<CreatedResponse>> {
        let booking = self.service.create_booking(request, user.user_id).await?;

        Ok(ApiResponse::success_with_message(
            CreatedResponse { id: booking.id },
            "Reserva creada exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookingDetailResponse> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;

        let vehicle = self
            .vehicles
            .find_summary(booking.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Booking {} references a missing vehicle", id))
            })?;

        let status_history = self.history.history(id).await?;
        let inspections = self.inspections.find_by_booking(id).await?;

        Ok(BookingDetailResponse {
            current_status: latest_status(&status_history),
            booking,
            vehicle,
            status_history,
            inspections,
        })
    }

    /// Añadir una entrada al historial; cualquier transición es válida
    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> AppResult<ApiResponse<BookingStatusEntry>> {
        request.validate()?;
        let status = required("status", request.status)?;

        let entry = self.history.append(id, status, user.user_id, request.note).await?;
        info!("📋 Reserva {} -> {:?}", id, entry.status);

        Ok(ApiResponse::success_with_message(entry, "Estado actualizado"))
    }
}

/// Interpretar los filtros crudos; `endDate` incluye el día completo
fn booking_filters(query: &BookingListQuery) -> AppResult<BookingFilters> {
    let start_from = non_blank(query.start_date.as_deref())
        .map(|raw| parse_date_filter("startDate", raw))
        .transpose()?;

    let end_before = non_blank(query.end_date.as_deref())
        .map(|raw| parse_date_filter("endDate", raw))
        .transpose()?
        .map(|end| {
            end.date_naive()
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc()
                + Duration::days(1)
        });

    Ok(BookingFilters {
        search: query.search.clone(),
        status: parse_optional_enum("status", query.status.as_deref())?,
        payment_method: parse_optional_enum("paymentMethod", query.payment_method.as_deref())?,
        start_from,
        end_before,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::BookingStatus;

    #[test]
    fn test_booking_filters_end_date_is_inclusive_day() {
        let query = BookingListQuery {
            start_date: Some("2024-06-01".to_string()),
            end_date: Some("2024-06-30".to_string()),
            status: Some("Active".to_string()),
            ..Default::default()
        };
        let filters = booking_filters(&query).unwrap();

        assert_eq!(filters.start_from.unwrap().to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert_eq!(filters.end_before.unwrap().to_rfc3339(), "2024-07-01T00:00:00+00:00");
        assert_eq!(filters.status, Some(BookingStatus::Active));
    }

    #[test]
    fn test_booking_filters_reject_unknown_status() {
        let query = BookingListQuery {
            status: Some("Bogus".to_string()),
            ..Default::default()
        };
        assert!(matches!(booking_filters(&query), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_booking_filters_blank_values_ignored() {
        let query = BookingListQuery {
            start_date: Some(" ".to_string()),
            status: Some("".to_string()),
            ..Default::default()
        };
        let filters = booking_filters(&query).unwrap();
        assert!(filters.start_from.is_none());
        assert!(filters.status.is_none());
    }
}
