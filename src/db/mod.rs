pub mod database_service;
pub mod session;
pub mod user;
