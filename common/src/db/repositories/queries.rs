// SQL text for the film repository
// Every statement is fixed; caller values only ever arrive as `?` bindings

/// SQL query fragments for the film table
pub mod film_queries {
    /// Columns mapped onto `Film`
    ///
    /// `film_id` and `language_id` are unsigned and `release_year` is a
    /// `YEAR`, so all three are cast to BIGINT for decoding.
    pub const SELECT_ALL_COLUMNS: &str = r#"CAST(film_id AS SIGNED) AS film_id,
        title,
        CAST(release_year AS SIGNED) AS release_year,
        CAST(language_id AS SIGNED) AS language_id"#;

    pub const FROM_FILM: &str = "FROM film";

    pub const WHERE_ID: &str = "WHERE film_id = ?";

    pub const WHERE_TITLE_LIKE: &str = "WHERE title LIKE ?";

    pub const INSERT: &str = r#"
        INSERT INTO film (title, release_year, language_id)
        VALUES (?, ?, ?)
        "#;

    pub const UPDATE: &str = r#"
        UPDATE film
        SET title = ?,
            release_year = ?,
            language_id = ?
        WHERE film_id = ?
        "#;

    pub const DELETE: &str = "DELETE FROM film WHERE film_id = ?";

    pub const EXISTS: &str = "SELECT 1 FROM film WHERE film_id = ?";
}

/// Build a SELECT over the film columns with an optional trailing clause
pub fn select_films(clause: Option<&str>) -> String {
    match clause {
        Some(clause) => format!(
            "SELECT {} {} {}",
            film_queries::SELECT_ALL_COLUMNS,
            film_queries::FROM_FILM,
            clause
        ),
        None => format!(
            "SELECT {} {}",
            film_queries::SELECT_ALL_COLUMNS,
            film_queries::FROM_FILM
        ),
    }
}
