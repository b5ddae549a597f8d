//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! extracción de cuerpos JSON y JWT.

pub mod errors;
pub mod extract;
pub mod jwt;
pub mod validation;
