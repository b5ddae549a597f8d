//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::{value::StrDeserializer, DeserializeOwned, IntoDeserializer};
use serde::Serialize;
use validator::ValidationError;

use crate::utils::errors::{validation_error, AppResult};

lazy_static! {
    /// VIN de 17 caracteres, sin I, O ni Q
    pub static ref RE_VIN: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
    /// Matrícula: letras, dígitos, espacios y guiones
    pub static ref RE_LICENSE_PLATE: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,14}$").unwrap();
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 7 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Importes monetarios (tarifa, total, depósito)
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Extraer un campo obligatorio ya validado con `#[validate(required)]`
pub fn required<T>(field: &'static str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| validation_error(field, "Campo requerido"))
}

/// Interpretar un filtro de fecha: `YYYY-MM-DD` o RFC3339
pub fn parse_date_filter(field: &'static str, value: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(date) = validate_date(value) {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    validate_datetime(value)
        .map_err(|_| validation_error(field, "Formato de fecha inválido (YYYY-MM-DD o RFC3339)"))
}

/// Interpretar un valor de enum recibido como texto (query string)
pub fn parse_enum<T: DeserializeOwned>(field: &'static str, value: &str) -> AppResult<T> {
    let deserializer: StrDeserializer<'_, serde::de::value::Error> = value.into_deserializer();
    T::deserialize(deserializer)
        .map_err(|_| validation_error(field, &format!("Valor no permitido: '{}'", value)))
}

/// Filtro opcional de enum; vacío equivale a ausente
pub fn parse_optional_enum<T: DeserializeOwned>(
    field: &'static str,
    value: Option<&str>,
) -> AppResult<Option<T>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => parse_enum(field, raw).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::BookingStatus;

    #[test]
    fn test_validate_date() {
        let valid_date = "2024-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2024/01/15";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+34 600 123 456").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_money() {
        assert!(validate_money(&Decimal::new(4500, 2)).is_ok());
        assert!(validate_money(&Decimal::ZERO).is_ok());
        assert!(validate_money(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_vin_regex() {
        assert!(RE_VIN.is_match("1HGCM82633A004352"));
        assert!(!RE_VIN.is_match("1HGCM82633A00435"));
        assert!(!RE_VIN.is_match("1HGCM82633A00435O"));
    }

    #[test]
    fn test_license_plate_regex() {
        assert!(RE_LICENSE_PLATE.is_match("AB-123-CD"));
        assert!(RE_LICENSE_PLATE.is_match("1234 BCD"));
        assert!(!RE_LICENSE_PLATE.is_match("-"));
        assert!(!RE_LICENSE_PLATE.is_match("AB_123"));
    }

    #[test]
    fn test_parse_date_filter() {
        let parsed = parse_date_filter("startDate", "2024-03-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let parsed = parse_date_filter("startDate", "2024-03-01T10:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        assert!(parse_date_filter("startDate", "01/03/2024").is_err());
    }

    #[test]
    fn test_parse_enum() {
        let status: BookingStatus = parse_enum("status", "CheckoutStarted").unwrap();
        assert_eq!(status, BookingStatus::CheckoutStarted);
        assert!(parse_enum::<BookingStatus>("status", "Bogus").is_err());
    }

    #[test]
    fn test_required() {
        assert_eq!(required("totalDays", Some(3)).unwrap(), 3);
        assert!(required::<i32>("totalDays", None).is_err());
    }

    #[test]
    fn test_parse_optional_enum_blank_is_none() {
        let status: Option<BookingStatus> = parse_optional_enum("status", Some("  ")).unwrap();
        assert!(status.is_none());
        let status: Option<BookingStatus> = parse_optional_enum("status", None).unwrap();
        assert!(status.is_none());
    }
}
