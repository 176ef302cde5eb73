// Database layer module: MySQL connection pool and film repositories

pub mod pool;
pub mod repositories;

pub use pool::{DbPool, PoolLease};
pub use repositories::{FilmRepository, InMemoryFilmRepository, MySqlFilmRepository};
