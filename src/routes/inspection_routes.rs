use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::inspection_controller::InspectionController;
use crate::dto::api_response::ApiResponse;
use crate::dto::inspection_dto::CreateInspectionRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::inspection::InspectionReport;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::JsonBody;

pub fn create_inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inspection))
        .route("/:id", get(get_inspection))
}

async fn create_inspection(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(request): JsonBody<CreateInspectionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InspectionReport>>), AppError> {
    let controller = InspectionController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InspectionReport>, AppError> {
    let controller = InspectionController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
