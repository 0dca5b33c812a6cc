pub mod config;
pub mod db;
pub mod flow;
pub mod routes;
pub mod types;
pub mod utils;
