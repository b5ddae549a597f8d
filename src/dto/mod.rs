pub mod api_response;
pub mod auth_dto;
pub mod booking_dto;
pub mod customer_dto;
pub mod inspection_dto;
pub mod media_dto;
pub mod pagination;
pub mod user_dto;
pub mod vehicle_dto;
