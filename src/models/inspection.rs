//! Modelo de InspectionReport
//!
//! Informe inmutable de estado exterior o interior ligado a una reserva.
//! Las zonas son columnas opcionales sea cual sea el tipo de inspección.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de inspección - mapea al ENUM inspection_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "inspection_type", rename_all = "snake_case")]
pub enum InspectionType {
    Exterior,
    Interior,
}

/// Estado de una zona - mapea al ENUM zone_condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "zone_condition", rename_all = "snake_case")]
pub enum ZoneCondition {
    #[serde(rename = "OK", alias = "Ok")]
    Ok,
    Damage,
}

/// Estado por zona; exterior usa front/rear/left/right/trunk, interior el resto
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStatuses {
    pub front: Option<ZoneCondition>,
    pub rear: Option<ZoneCondition>,
    #[sqlx(rename = "left_side")]
    pub left: Option<ZoneCondition>,
    #[sqlx(rename = "right_side")]
    pub right: Option<ZoneCondition>,
    pub trunk: Option<ZoneCondition>,
    pub dashboard: Option<ZoneCondition>,
    pub seats: Option<ZoneCondition>,
    pub front_seats: Option<ZoneCondition>,
}

impl ZoneStatuses {
    /// Zonas marcadas con daño
    pub fn damaged_zones(&self) -> Vec<&'static str> {
        [
            ("front", self.front),
            ("rear", self.rear),
            ("left", self.left),
            ("right", self.right),
            ("trunk", self.trunk),
            ("dashboard", self.dashboard),
            ("seats", self.seats),
            ("frontSeats", self.front_seats),
        ]
        .into_iter()
        .filter(|(_, condition)| *condition == Some(ZoneCondition::Damage))
        .map(|(name, _)| name)
        .collect()
    }
}

/// InspectionReport - mapea a la tabla inspection_reports
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub id: Uuid,
    pub booking_id: Uuid,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub zones: ZoneStatuses,
    pub notes: Option<String>,
    pub inspector_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damaged_zones() {
        let zones = ZoneStatuses {
            front: Some(ZoneCondition::Ok),
            rear: Some(ZoneCondition::Damage),
            trunk: Some(ZoneCondition::Damage),
            ..Default::default()
        };
        assert_eq!(zones.damaged_zones(), vec!["rear", "trunk"]);
    }

    #[test]
    fn test_zone_condition_json() {
        let parsed: ZoneCondition = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(parsed, ZoneCondition::Ok);
        let parsed: ZoneCondition = serde_json::from_str("\"Damage\"").unwrap();
        assert_eq!(parsed, ZoneCondition::Damage);
        assert_eq!(serde_json::to_value(ZoneCondition::Ok).unwrap(), "OK");
    }
}
