//! Servicio de autenticación
//!
//! Login con email/contraseña (bcrypt) y emisión del JWT de sesión.
//! También crea el administrador inicial cuando la tabla de usuarios está vacía.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    /// Autenticar un operador y emitir su token
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            warn!("🔒 Contraseña incorrecta para {}", user.email);
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        if !user.is_active {
            return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
        }

        let token = generate_token(user.id, &user.email, user.role, &self.jwt)?;
        info!("🔑 Sesión iniciada: {} ({:?})", user.email, user.role);

        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user,
        })
    }

    /// Crear el administrador inicial si no hay usuarios y hay credenciales configuradas
    pub async fn bootstrap_admin(&self, config: &EnvironmentConfig) -> AppResult<Option<User>> {
        let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
            return Ok(None);
        };

        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let password_hash = hash_password(password)?;
        let admin = self
            .users
            .create(email.trim(), &config.admin_full_name, &password_hash, UserRole::Admin)
            .await?;

        info!("👤 Administrador inicial creado: {}", admin.email);
        Ok(Some(admin))
    }
}

/// Hash bcrypt de una contraseña
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))
}

/// Comparar una contraseña con su hash
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash).map_err(|e| AppError::Hash(e.to_string()))
}
