use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};

use crate::controllers::media_controller::MediaController;
use crate::dto::api_response::ApiResponse;
use crate::dto::media_dto::RegisterMediaRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::media::Media;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::JsonBody;

pub fn create_media_router() -> Router<AppState> {
    Router::new().route("/", post(register_media))
}

async fn register_media(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(request): JsonBody<RegisterMediaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Media>>), AppError> {
    let controller = MediaController::new(state.pool.clone());
    let response = controller.register(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
