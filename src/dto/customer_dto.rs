use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::booking::Booking;
use crate::models::customer::Customer;
use crate::utils::validation::{validate_not_empty, validate_phone};

// Alta manual de cliente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 100), custom = "validate_not_empty")]
    pub full_name: String,

    #[serde(default)]
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub license_number: String,

    #[validate(length(max = 255))]
    pub address: Option<String>,
}

// Parámetros crudos del listado de clientes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

// Búsqueda para autocompletar el asistente
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
}

// Cliente con su historial de reservas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: Customer,
    pub bookings: Vec<Booking>,
}
