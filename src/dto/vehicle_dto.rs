use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::media::VehicleMedia;
use crate::models::status::{serialize_current_status, VehicleStatus, VehicleStatusEntry};
use crate::models::vehicle::{FuelType, NewVehicle, Transmission, Vehicle, VehicleType};
use crate::utils::errors::AppResult;
use crate::utils::validation::{required, RE_LICENSE_PLATE, RE_VIN};

// Request para crear un vehículo (formulario de administración)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(required, range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[serde(default)]
    #[validate(regex = "RE_VIN")]
    pub vin: String,

    #[serde(default)]
    #[validate(regex = "RE_LICENSE_PLATE")]
    pub license_plate: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub color: String,

    #[validate(required)]
    pub vehicle_type: Option<VehicleType>,

    #[validate(required)]
    pub transmission: Option<Transmission>,

    #[validate(required)]
    pub fuel_type: Option<FuelType>,

    #[validate(required, range(min = 1, max = 60))]
    pub seats: Option<i32>,

    #[validate(required, range(min = 1, max = 10))]
    pub doors: Option<i32>,

    #[validate(range(min = 0, max = 50))]
    pub baggage_capacity: Option<i32>,

    #[serde(default)]
    pub has_air_conditioning: bool,
    #[serde(default)]
    pub has_gps: bool,
    #[serde(default)]
    pub has_bluetooth: bool,
    #[serde(default)]
    pub has_backup_camera: bool,
    #[serde(default)]
    pub has_child_seat: bool,

    #[validate(range(min = 0))]
    pub odometer: Option<i32>,
}

impl CreateVehicleRequest {
    /// Convertir una request ya validada en los datos de alta
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        Ok(NewVehicle {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: required("year", self.year)?,
            vin: self.vin.to_uppercase(),
            license_plate: self.license_plate.trim().to_uppercase(),
            color: self.color.trim().to_string(),
            vehicle_type: required("vehicle_type", self.vehicle_type)?,
            transmission: required("transmission", self.transmission)?,
            fuel_type: required("fuel_type", self.fuel_type)?,
            seats: required("seats", self.seats)?,
            doors: required("doors", self.doors)?,
            baggage_capacity: self.baggage_capacity.unwrap_or(0),
            has_air_conditioning: self.has_air_conditioning,
            has_gps: self.has_gps,
            has_bluetooth: self.has_bluetooth,
            has_backup_camera: self.has_backup_camera,
            has_child_seat: self.has_child_seat,
            odometer: self.odometer.unwrap_or(0),
        })
    }
}

// Request para editar especificaciones; solo se tocan los campos presentes
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(regex = "RE_VIN")]
    pub vin: Option<String>,

    #[validate(regex = "RE_LICENSE_PLATE")]
    pub license_plate: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,

    pub vehicle_type: Option<VehicleType>,
    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,

    #[validate(range(min = 1, max = 60))]
    pub seats: Option<i32>,

    #[validate(range(min = 1, max = 10))]
    pub doors: Option<i32>,

    #[validate(range(min = 0, max = 50))]
    pub baggage_capacity: Option<i32>,

    pub has_air_conditioning: Option<bool>,
    pub has_gps: Option<bool>,
    pub has_bluetooth: Option<bool>,
    pub has_backup_camera: Option<bool>,
    pub has_child_seat: Option<bool>,

    #[validate(range(min = 0))]
    pub odometer: Option<i32>,
}

// Request para añadir una entrada al historial de estados
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleStatusRequest {
    #[validate(required)]
    pub status: Option<VehicleStatus>,

    #[validate(length(max = 500))]
    pub note: Option<String>,
}

// Parámetros crudos del listado de vehículos
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

// Ficha completa del vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(serialize_with = "serialize_current_status")]
    pub current_status: Option<VehicleStatus>,
    pub status_history: Vec<VehicleStatusEntry>,
    pub media: Vec<VehicleMedia>,
}
