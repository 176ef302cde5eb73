// Film repository implementation backed by MySQL

use super::queries::{film_queries, select_films};
use super::{film_not_found, FilmRepository};
use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::{Film, SearchPattern};
use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use tracing::instrument;

/// Repository for film-related database operations
#[derive(Debug, Clone)]
pub struct MySqlFilmRepository {
    pool: DbPool,
}

impl MySqlFilmRepository {
    /// Create a new MySqlFilmRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl FilmRepository for MySqlFilmRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Film>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(&select_films(None))
            .fetch_all(&mut *conn)
            .await?;

        let films = rows.iter().map(film_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = films.len(), "Listed films");
        Ok(films)
    }

    #[instrument(skip(self, pattern), fields(prefix = %pattern.prefix()))]
    async fn search(&self, pattern: &SearchPattern) -> Result<Vec<Film>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(&select_films(Some(film_queries::WHERE_TITLE_LIKE)))
            .bind(pattern.as_like_pattern())
            .fetch_all(&mut *conn)
            .await?;

        let films = rows.iter().map(film_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = films.len(), "Found films by title prefix");
        Ok(films)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, DatabaseError> {
        if id <= 0 {
            return Ok(None);
        }

        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(&select_films(Some(film_queries::WHERE_ID)))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(film_from_row).transpose()
    }

    #[instrument(skip(self, film), fields(title = %film.title))]
    async fn create(&self, film: &Film) -> Result<Film, DatabaseError> {
        film.validate()?;

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(film_queries::INSERT)
            .bind(&film.title)
            .bind(film.release_year)
            .bind(film.language_id)
            .execute(&mut *conn)
            .await?;

        let id = i64::try_from(result.last_insert_id()).map_err(|e| {
            DatabaseError::RowMapping {
                column: "film_id".to_string(),
                reason: e.to_string(),
            }
        })?;
        if id == 0 {
            return Err(DatabaseError::QueryFailed(
                "Insert did not produce a generated key".to_string(),
            ));
        }

        tracing::info!(
            film_id = id,
            rows = result.rows_affected(),
            "Film created"
        );

        Ok(Film {
            id,
            ..film.clone()
        })
    }

    #[instrument(skip(self, film), fields(title = %film.title))]
    async fn update(&self, id: i64, film: &Film) -> Result<Film, DatabaseError> {
        film.validate()?;
        if id <= 0 {
            return Err(film_not_found(id));
        }

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(film_queries::UPDATE)
            .bind(&film.title)
            .bind(film.release_year)
            .bind(film.language_id)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            // Without CLIENT_FOUND_ROWS an unchanged row also reports zero,
            // so only a missing row is treated as not found
            let exists = sqlx::query(film_queries::EXISTS)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .is_some();
            if !exists {
                return Err(film_not_found(id));
            }
        }

        tracing::info!(
            film_id = id,
            rows = result.rows_affected(),
            "Film updated"
        );

        Ok(Film {
            id,
            ..film.clone()
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        if id <= 0 {
            return Err(film_not_found(id));
        }

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(film_queries::DELETE)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(film_not_found(id));
        }

        tracing::info!(film_id = id, "Film deleted");
        Ok(())
    }
}

/// Map one result row onto a `Film`
fn film_from_row(row: &MySqlRow) -> Result<Film, DatabaseError> {
    let id: i64 = row.try_get("film_id")?;
    let title: String = row.try_get("title")?;
    // NULL release years read as 0
    let release_year: Option<i64> = row.try_get("release_year")?;
    let language_id: i64 = row.try_get("language_id")?;

    Ok(Film {
        id,
        title,
        release_year: narrow("release_year", release_year.unwrap_or(0))?,
        language_id: narrow("language_id", language_id)?,
    })
}

fn narrow(column: &str, value: i64) -> Result<i32, DatabaseError> {
    i32::try_from(value).map_err(|e| DatabaseError::RowMapping {
        column: column.to_string(),
        reason: e.to_string(),
    })
}
