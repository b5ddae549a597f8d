//! Modelos de Media y VehicleMedia
//!
//! El almacenamiento del archivo lo hace un proveedor externo; aquí solo
//! se guardan los metadatos y la asociación con vehículos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol de la imagen en la ficha del vehículo - mapea al ENUM media_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "media_role", rename_all = "snake_case")]
pub enum MediaRole {
    Front,
    Back,
    Interior,
    #[default]
    Gallery,
}

/// Media - mapea a la tabla media
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub blur_data_url: Option<String>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Media asociada a un vehículo, con rol y orden
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMedia {
    pub vehicle_id: Uuid,
    pub role: MediaRole,
    pub sort_order: i32,
    #[sqlx(flatten)]
    pub media: Media,
}
