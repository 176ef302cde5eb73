// Data-access layer for the sakila `film` table

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod telemetry;
