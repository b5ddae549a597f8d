//! Extractores propios
//!
//! `JsonBody` sustituye a `axum::Json` en los cuerpos de petición para que
//! un JSON mal formado o con tipos incorrectos responda con el mismo formato
//! de error que el resto de la API.

use axum::extract::FromRequest;

use crate::utils::errors::AppError;

/// Cuerpo JSON cuyos rechazos se convierten en `AppError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
