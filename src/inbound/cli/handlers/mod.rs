pub mod auth;
pub mod dashboard;
pub mod projects;
pub mod team;
