use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::media_dto::LinkVehicleMediaRequest;
use crate::dto::pagination::Paginated;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, UpdateVehicleStatusRequest, VehicleDetailResponse,
    VehicleListQuery,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::media::VehicleMedia;
use crate::models::status::VehicleStatusEntry;
use crate::models::vehicle::{Vehicle, VehicleListItem};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::JsonBody;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).patch(update_vehicle))
        .route("/:id/status", patch(update_vehicle_status))
        .route("/:id/media", get(list_vehicle_media).post(link_vehicle_media))
        .route("/:id/media/:media_id", delete(unlink_vehicle_media))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<Paginated<VehicleListItem>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(request): JsonBody<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<UpdateVehicleStatusRequest>,
) -> Result<Json<ApiResponse<VehicleStatusEntry>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update_status(&user, id, request).await?;
    Ok(Json(response))
}

async fn list_vehicle_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<VehicleMedia>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_media(id).await?;
    Ok(Json(response))
}

async fn link_vehicle_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<LinkVehicleMediaRequest>,
) -> Result<Json<ApiResponse<Vec<VehicleMedia>>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.link_media(id, request).await?;
    Ok(Json(response))
}

async fn unlink_vehicle_media(
    State(state): State<AppState>,
    Path((id, media_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.unlink_media(id, media_id).await?;
    Ok(Json(response))
}
