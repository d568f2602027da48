pub mod bookings;
pub mod config;
