use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::customer_dto::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListQuery, SuggestionQuery,
};
use crate::dto::pagination::{Paginated, Pagination};
use crate::models::customer::Customer;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::services::listing::{resolve_sort, CUSTOMER_SORT_COLUMNS};
use crate::utils::errors::{not_found_error, AppResult};

pub const DEFAULT_SUGGESTIONS: i64 = 5;
pub const MAX_SUGGESTIONS: i64 = 10;

pub struct CustomerController {
    repository: CustomerRepository,
    bookings: BookingRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }

    pub async fn list(&self, query: CustomerListQuery) -> AppResult<Paginated<Customer>> {
        let sort = resolve_sort(
            CUSTOMER_SORT_COLUMNS,
            query.sort_by.as_deref(),
            query.sort_dir.as_deref(),
        );
        let pagination = Pagination::from_raw(query.page.as_deref(), query.page_size.as_deref());

        let (customers, total) = self
            .repository
            .list(query.search.as_deref(), sort, pagination)
            .await?;
        Ok(Paginated::new(customers, total, pagination))
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<ApiResponse<Customer>> {
        request.validate()?;
        let customer = self.repository.create(&request).await?;

        Ok(ApiResponse::success_with_message(
            customer,
            "Cliente creado exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CustomerDetailResponse> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;

        let bookings = self.bookings.find_by_customer(id).await?;
        Ok(CustomerDetailResponse { customer, bookings })
    }

    /// Autocompletado del asistente; una búsqueda vacía no devuelve nada
    pub async fn suggestions(&self, query: SuggestionQuery) -> AppResult<Vec<Customer>> {
        let term = query.q.as_deref().map(str::trim).unwrap_or_default();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.suggest(term, suggestion_limit(query.limit.as_deref())).await
    }
}

fn suggestion_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_SUGGESTIONS)
        .clamp(1, MAX_SUGGESTIONS)
}
