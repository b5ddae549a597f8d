//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los enums de especificaciones.
//! Mapea exactamente a la tabla `vehicles`; el estado vive en `vehicle_status_history`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::status::{serialize_current_status, VehicleStatus};

/// Tipo de carrocería - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "snake_case")]
pub enum VehicleType {
    Sedan,
    Suv,
    Hatchback,
    Coupe,
    Convertible,
    Wagon,
    Van,
    Truck,
}

/// Transmisión - mapea al ENUM transmission_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "transmission_type", rename_all = "snake_case")]
pub enum Transmission {
    Automatic,
    Manual,
}

/// Combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fuel_type", rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub license_plate: String,
    pub color: String,
    pub vehicle_type: VehicleType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: i32,
    pub doors: i32,
    pub baggage_capacity: i32,
    pub has_air_conditioning: bool,
    pub has_gps: bool,
    pub has_bluetooth: bool,
    pub has_backup_camera: bool,
    pub has_child_seat: bool,
    pub odometer: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos validados para dar de alta un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub license_plate: String,
    pub color: String,
    pub vehicle_type: VehicleType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: i32,
    pub doors: i32,
    pub baggage_capacity: i32,
    pub has_air_conditioning: bool,
    pub has_gps: bool,
    pub has_bluetooth: bool,
    pub has_backup_camera: bool,
    pub has_child_seat: bool,
    pub odometer: i32,
}

/// Fila del listado: vehículo + último estado del historial
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(serialize_with = "serialize_current_status")]
    pub current_status: Option<VehicleStatus>,
    pub status_changed_at: Option<DateTime<Utc>>,
}

/// Resumen de vehículo embebido en reservas
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            license_plate: vehicle.license_plate.clone(),
        }
    }
}
