use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::media_dto::RegisterMediaRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::media::Media;
use crate::repositories::media_repository::MediaRepository;
use crate::utils::errors::AppResult;

pub struct MediaController {
    repository: MediaRepository,
}

impl MediaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MediaRepository::new(pool),
        }
    }

    /// Registrar los metadatos de un archivo subido al proveedor externo
    pub async fn register(
        &self,
        user: &AuthenticatedUser,
        request: RegisterMediaRequest,
    ) -> AppResult<ApiResponse<Media>> {
        request.validate()?;
        let media = self.repository.register(request, user.user_id).await?;

        Ok(ApiResponse::success_with_message(media, "Imagen registrada"))
    }
}
