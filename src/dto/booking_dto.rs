use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{Booking, NewBooking, PaymentMethod};
use crate::models::inspection::InspectionReport;
use crate::models::status::{serialize_current_status, BookingStatus, BookingStatusEntry};
use crate::models::vehicle::VehicleSummary;
use crate::utils::errors::AppResult;
use crate::utils::validation::{required, validate_money, validate_not_empty, validate_phone};

// Request del asistente de reservas
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(required)]
    pub vehicle_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(min = 2, max = 100), custom = "validate_not_empty")]
    pub customer_name: String,

    #[serde(default)]
    #[validate(email, length(max = 255))]
    pub customer_email: String,

    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub customer_phone: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 50), custom = "validate_not_empty")]
    pub customer_license: String,

    #[validate(length(max = 255))]
    pub customer_address: Option<String>,

    #[validate(required)]
    pub start_date: Option<DateTime<Utc>>,

    #[validate(required)]
    pub end_date: Option<DateTime<Utc>>,

    #[validate(required, custom = "validate_money")]
    pub daily_rate: Option<Decimal>,

    #[validate(required, range(min = 1, max = 365))]
    pub total_days: Option<i32>,

    #[validate(required, custom = "validate_money")]
    pub total_amount: Option<Decimal>,

    #[validate(custom = "validate_money")]
    pub security_deposit: Option<Decimal>,

    #[validate(required)]
    pub payment_method: Option<PaymentMethod>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    /// Convertir una request ya validada en los datos de la reserva
    pub fn into_new_booking(self) -> AppResult<NewBooking> {
        Ok(NewBooking {
            vehicle_id: required("vehicle_id", self.vehicle_id)?,
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_lowercase(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_license: self.customer_license.trim().to_string(),
            customer_address: self.customer_address,
            start_date: required("start_date", self.start_date)?,
            end_date: required("end_date", self.end_date)?,
            daily_rate: required("daily_rate", self.daily_rate)?,
            total_days: required("total_days", self.total_days)?,
            total_amount: required("total_amount", self.total_amount)?,
            security_deposit: self.security_deposit.unwrap_or_default(),
            payment_method: required("payment_method", self.payment_method)?,
            notes: self.notes,
        })
    }
}

// Request para añadir una entrada al historial de la reserva
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    #[validate(required)]
    pub status: Option<BookingStatus>,

    #[validate(length(max = 500))]
    pub note: Option<String>,
}

// Parámetros crudos del listado de reservas
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

// Detalle de reserva con historial e inspecciones
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle: VehicleSummary,
    #[serde(serialize_with = "serialize_current_status")]
    pub current_status: Option<BookingStatus>,
    pub status_history: Vec<BookingStatusEntry>,
    pub inspections: Vec<InspectionReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn valid_payload() -> serde_json::Value {
        json!({
            "vehicleId": "6f1c2a47-2a8e-4b5e-9f59-3f2b8d1c0a11",
            "customerName": "Ana García",
            "customerEmail": "a@x.com",
            "customerPhone": "+34 600 123 456",
            "customerLicense": "B-12345678",
            "startDate": "2024-06-01T10:00:00Z",
            "endDate": "2024-06-04T10:00:00Z",
            "dailyRate": "45.50",
            "totalDays": 3,
            "totalAmount": "136.50",
            "securityDeposit": 300,
            "paymentMethod": "CreditCard"
        })
    }

    #[test]
    fn test_create_booking_request_valid() {
        let request: CreateBookingRequest = serde_json::from_value(valid_payload()).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.daily_rate, Some(Decimal::new(4550, 2)));
        assert_eq!(request.payment_method, Some(PaymentMethod::CreditCard));
    }

    #[test]
    fn test_missing_customer_email_fails_validation() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("customerEmail");

        let request: CreateBookingRequest = serde_json::from_value(payload).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("customer_email"));
    }

    #[test]
    fn test_into_new_booking() {
        let mut payload = valid_payload();
        payload["customerEmail"] = json!(" A@X.com ");
        payload.as_object_mut().unwrap().remove("securityDeposit");

        let request: CreateBookingRequest = serde_json::from_value(payload).unwrap();
        let booking = request.into_new_booking().unwrap();
        assert_eq!(booking.customer_email, "a@x.com");
        assert_eq!(booking.security_deposit, Decimal::ZERO);
        assert_eq!(booking.expected_total(), Decimal::new(13650, 2));
    }

    #[test]
    fn test_negative_amount_fails_validation() {
        let mut payload = valid_payload();
        payload["totalAmount"] = json!("-10.00");

        let request: CreateBookingRequest = serde_json::from_value(payload).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("total_amount"));
    }

    #[test]
    fn test_missing_dates_and_payment_method() {
        let mut payload = valid_payload();
        let object = payload.as_object_mut().unwrap();
        object.remove("startDate");
        object.remove("paymentMethod");

        let request: CreateBookingRequest = serde_json::from_value(payload).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("start_date"));
        assert!(fields.contains_key("payment_method"));
    }
}
