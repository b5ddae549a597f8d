//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de `migrations/`.

pub mod booking;
pub mod customer;
pub mod inspection;
pub mod media;
pub mod status;
pub mod user;
pub mod vehicle;
