use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::pagination::{Paginated, Pagination};
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::hash_password;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self, query: UserListQuery) -> AppResult<Paginated<User>> {
        let pagination = Pagination::from_raw(query.page.as_deref(), query.page_size.as_deref());
        let (users, total) = self.repository.list(query.search.as_deref(), pagination).await?;
        Ok(Paginated::new(users, total, pagination))
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<ApiResponse<User>> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        if self.repository.email_exists(&email).await? {
            return Err(conflict_error("User", "email", &email));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .repository
            .create(
                &email,
                request.full_name.trim(),
                &password_hash,
                request.role.unwrap_or(UserRole::Operator),
            )
            .await?;

        info!("👤 Usuario {} creado ({:?})", user.email, user.role);
        Ok(ApiResponse::success_with_message(user, "Usuario creado exitosamente"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<ApiResponse<User>> {
        request.validate()?;

        let password_hash = request
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;

        let user = self
            .repository
            .update(
                id,
                request.full_name.map(|name| name.trim().to_string()),
                request.role,
                request.is_active,
                password_hash,
            )
            .await?
            .ok_or_else(|| not_found_error("User", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(user, "Usuario actualizado exitosamente"))
    }
}
