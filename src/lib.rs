//! Backend de gestión de flota de alquiler
//!
//! Vehículos con historial de estados, reservas transaccionales, clientes,
//! inspecciones y administración de usuarios sobre PostgreSQL.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
