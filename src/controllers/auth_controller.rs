use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::AuthService;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::JwtConfig;

pub struct AuthController {
    service: AuthService,
    users: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            service: AuthService::new(pool.clone(), jwt),
            users: UserRepository::new(pool),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;
        self.service.login(&request).await
    }

    /// Usuario de la sesión actual; una cuenta desactivada invalida la sesión
    pub async fn me(&self, user: &AuthenticatedUser) -> AppResult<User> {
        let current = self
            .users
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        if !current.is_active {
            return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
        }

        Ok(current)
    }
}
