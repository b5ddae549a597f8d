//! Services module
//!
//! Lógica que combina varios repositorios: autenticación, el flujo
//! transaccional de reservas y la construcción de listados.

pub mod auth_service;
pub mod booking_service;
pub mod listing;
