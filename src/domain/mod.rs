pub mod auth;
pub mod platform;
pub mod session;
pub mod views;
