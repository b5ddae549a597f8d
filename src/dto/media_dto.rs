use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::media::MediaRole;

// Metadatos devueltos por el proveedor de subida
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMediaRequest {
    #[serde(default)]
    #[validate(url)]
    pub url: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub filename: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 100))]
    pub mime_type: String,

    #[validate(range(min = 0))]
    pub size_bytes: Option<i64>,

    #[validate(range(min = 1))]
    pub width: Option<i32>,

    #[validate(range(min = 1))]
    pub height: Option<i32>,

    pub blur_data_url: Option<String>,
}

// Asociar una media existente a un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkVehicleMediaRequest {
    #[validate(required)]
    pub media_id: Option<Uuid>,

    #[serde(default)]
    pub role: MediaRole,

    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}
