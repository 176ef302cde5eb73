use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Language assigned to a film when the caller does not pick one
pub const DEFAULT_LANGUAGE_ID: i32 = 1;

/// Longest title the `film.title` column accepts
pub const MAX_TITLE_LENGTH: usize = 128;

/// Range of the MySQL `YEAR` type backing `film.release_year`
pub const MIN_RELEASE_YEAR: i32 = 1901;
pub const MAX_RELEASE_YEAR: i32 = 2155;

// ============================================================================
// Film Models
// ============================================================================

/// A row of the `film` table.
///
/// An `id` of `0` marks a transient film that has not been persisted yet.
/// Values are detached copies: they go stale once the row is updated or
/// deleted elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub release_year: i32,
    pub language_id: i32,
}

impl Film {
    /// Create a transient film in the default language
    pub fn new(title: impl Into<String>, release_year: i32) -> Self {
        Self::with_id(0, title, release_year)
    }

    pub fn with_id(id: i64, title: impl Into<String>, release_year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            release_year,
            language_id: DEFAULT_LANGUAGE_ID,
        }
    }

    pub fn with_language(mut self, language_id: i32) -> Self {
        self.language_id = language_id;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Check the mutable columns before they are written to the store
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }

        let title_length = self.title.chars().count();
        if title_length > MAX_TITLE_LENGTH {
            return Err(ValidationError::InvalidFieldValue {
                field: "title".to_string(),
                reason: format!(
                    "{} characters exceeds the limit of {}",
                    title_length, MAX_TITLE_LENGTH
                ),
            });
        }

        if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&self.release_year) {
            return Err(ValidationError::InvalidFieldValue {
                field: "release_year".to_string(),
                reason: format!(
                    "{} is outside {}..={}",
                    self.release_year, MIN_RELEASE_YEAR, MAX_RELEASE_YEAR
                ),
            });
        }

        if self.language_id <= 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "language_id".to_string(),
                reason: format!("{} is not a valid language reference", self.language_id),
            });
        }

        Ok(())
    }
}

impl Default for Film {
    fn default() -> Self {
        Self::new(String::new(), 0)
    }
}

// ============================================================================
// Search Models
// ============================================================================

/// A `LIKE` pattern matching titles that start with a literal prefix.
///
/// `%`, `_` and the `\` escape character in the prefix are escaped, so the
/// only wildcard in the pattern is the trailing `%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    prefix: String,
    pattern: String,
}

impl SearchPattern {
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let mut pattern = String::with_capacity(prefix.len() + 1);
        for c in prefix.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');

        Self { prefix, pattern }
    }

    /// The literal prefix as typed by the caller
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The escaped pattern bound to `title LIKE ?`
    pub fn as_like_pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, title: &str) -> bool {
        title.starts_with(&self.prefix)
    }
}
