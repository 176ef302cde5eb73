// Repository layer for database operations

pub mod film;
pub mod memory;
pub mod queries;

pub use film::MySqlFilmRepository;
pub use memory::InMemoryFilmRepository;

use crate::errors::DatabaseError;
use crate::models::{Film, SearchPattern};
use async_trait::async_trait;

/// CRUD operations over the `film` table.
///
/// Each call is an independent request: it leases a connection, runs one
/// statement and hands the connection back. Ids of `0` or below belong to
/// transient films and never match a stored row.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Every film, in the store's default order
    async fn list_all(&self) -> Result<Vec<Film>, DatabaseError>;

    /// Films whose title starts with the pattern's prefix
    async fn search(&self, pattern: &SearchPattern) -> Result<Vec<Film>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, DatabaseError>;

    /// Insert a film and return it with the generated id.
    /// Any id on the input is ignored.
    async fn create(&self, film: &Film) -> Result<Film, DatabaseError>;

    /// Overwrite title, release year and language of row `id`.
    /// Returns the film as requested with `id` applied; the row is not re-read.
    async fn update(&self, id: i64, film: &Film) -> Result<Film, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<(), DatabaseError>;
}

pub(crate) fn film_not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Film not found: {}", id))
}
