pub mod booking_repository;
pub mod customer_repository;
pub mod inspection_repository;
pub mod media_repository;
pub mod status_history_repository;
pub mod user_repository;
pub mod vehicle_repository;
