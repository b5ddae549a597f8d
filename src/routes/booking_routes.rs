use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::controllers::customer_controller::CustomerController;
use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::booking_dto::{
    BookingDetailResponse, BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::customer_dto::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListQuery, SuggestionQuery,
};
use crate::dto::pagination::Paginated;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::BookingListItem;
use crate::models::customer::Customer;
use crate::models::status::BookingStatusEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::JsonBody;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/suggestions", get(suggest_customers))
        .route("/customers/:id", get(get_customer))
        .route("/:id", get(get_booking))
        .route("/:id/status", patch(update_booking_status))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Paginated<BookingListItem>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(request): JsonBody<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDetailResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingStatusEntry>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update_status(&user, id, request).await?;
    Ok(Json(response))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<Paginated<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_customer(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn suggest_customers(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.suggestions(query).await?;
    Ok(Json(response))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDetailResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
