// In-memory film repository for development and testing

use super::{film_not_found, FilmRepository};
use crate::errors::DatabaseError;
use crate::models::{Film, SearchPattern};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

#[derive(Debug)]
struct FilmTable {
    // Insertion order stands in for the store's default order
    rows: Vec<Film>,
    next_id: i64,
}

/// `FilmRepository` kept in process memory.
///
/// Mirrors the MySQL repository's observable behaviour: generated ids are
/// increasing and never reused, prefix search is case-sensitive, and
/// update/delete of a missing id report `NotFound`.
#[derive(Debug)]
pub struct InMemoryFilmRepository {
    table: RwLock<FilmTable>,
}

impl InMemoryFilmRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(FilmTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed the table with existing rows, keeping their ids
    pub fn with_films(films: impl IntoIterator<Item = Film>) -> Self {
        let rows: Vec<Film> = films.into_iter().filter(Film::is_persisted).collect();
        let next_id = rows.iter().map(|f| f.id).max().unwrap_or(0) + 1;

        Self {
            table: RwLock::new(FilmTable { rows, next_id }),
        }
    }
}

impl Default for InMemoryFilmRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilmRepository for InMemoryFilmRepository {
    async fn list_all(&self) -> Result<Vec<Film>, DatabaseError> {
        Ok(self.table.read().await.rows.clone())
    }

    #[instrument(skip(self, pattern), fields(prefix = %pattern.prefix()))]
    async fn search(&self, pattern: &SearchPattern) -> Result<Vec<Film>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|film| pattern.matches(&film.title))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|film| film.id == id).cloned())
    }

    #[instrument(skip(self, film), fields(title = %film.title))]
    async fn create(&self, film: &Film) -> Result<Film, DatabaseError> {
        film.validate()?;

        let mut table = self.table.write().await;
        let created = Film {
            id: table.next_id,
            ..film.clone()
        };
        table.next_id += 1;
        table.rows.push(created.clone());

        tracing::debug!(film_id = created.id, "Film created");
        Ok(created)
    }

    #[instrument(skip(self, film), fields(title = %film.title))]
    async fn update(&self, id: i64, film: &Film) -> Result<Film, DatabaseError> {
        film.validate()?;

        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| film_not_found(id))?;

        let updated = Film {
            id,
            ..film.clone()
        };
        *row = updated.clone();

        tracing::debug!(film_id = id, "Film updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let mut table = self.table.write().await;
        let position = table
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| film_not_found(id))?;
        table.rows.remove(position);

        tracing::debug!(film_id = id, "Film deleted");
        Ok(())
    }
}
