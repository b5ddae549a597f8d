//! Modelo de Customer
//!
//! Cliente deduplicado por licencia, email o teléfono.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Customer - mapea a la tabla customers
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub address: Option<String>,
    pub total_rentals: i32,
    pub last_rental_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos de contacto usados para buscar un cliente existente
#[derive(Debug, Clone)]
pub struct ContactIdentity<'a> {
    pub email: &'a str,
    pub phone: &'a str,
    pub license_number: &'a str,
}
