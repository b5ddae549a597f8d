use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::inspection::{InspectionType, ZoneStatuses};

// Request para registrar una inspección
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectionRequest {
    #[validate(required)]
    pub booking_id: Option<Uuid>,

    #[serde(rename = "type")]
    #[validate(required)]
    pub inspection_type: Option<InspectionType>,

    #[serde(flatten)]
    pub zones: ZoneStatuses,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
