pub mod auth_controller;
pub mod booking_controller;
pub mod customer_controller;
pub mod inspection_controller;
pub mod media_controller;
pub mod user_controller;
pub mod vehicle_controller;
