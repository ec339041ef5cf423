pub mod app;
pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod products;
pub mod routes;
pub mod state;
