use serde::Deserialize;
use validator::Validate;

use crate::models::user::UserRole;

// Request para crear un usuario (solo admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: Option<UserRole>,
}

// Request para actualizar un usuario existente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

// Parámetros crudos del listado de usuarios
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
}
