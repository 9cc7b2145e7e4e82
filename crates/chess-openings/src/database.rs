//! Opening database storage and lookup.

use std::path::Path;
use std::sync::LazyLock;

use thiserror::Error;

use crate::builtin::builtin_openings;
use crate::opening::{OpeningEntry, OpeningMatch};

/// Errors that can occur when working with opening databases.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to read the opening database file.
    #[error("failed to read opening database: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The catalog parsed but contains an unusable entry.
    #[error("invalid opening entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },
}

static BUILTIN: LazyLock<OpeningDatabase> =
    LazyLock::new(|| OpeningDatabase::with_openings(builtin_openings()));

/// An immutable catalog of named chess openings.
///
/// Built once and shared read-only across requests; there are no mutating
/// methods after construction.
#[derive(Debug, Clone, Default)]
pub struct OpeningDatabase {
    openings: Vec<OpeningEntry>,
}

impl OpeningDatabase {
    /// Creates a database from the given openings.
    #[must_use]
    pub fn with_openings(openings: Vec<OpeningEntry>) -> Self {
        Self { openings }
    }

    /// Returns the shared built-in catalog.
    #[must_use]
    pub fn builtin() -> &'static OpeningDatabase {
        &BUILTIN
    }

    /// Parses a catalog from a JSON array of opening entries.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::JsonError`] for malformed JSON and
    /// [`DatabaseError::InvalidEntry`] for an entry without moves.
    pub fn from_json(json: &str) -> Result<Self, DatabaseError> {
        let openings: Vec<OpeningEntry> = serde_json::from_str(json)?;
        if let Some(empty) = openings.iter().find(|o| o.moves.is_empty()) {
            return Err(DatabaseError::InvalidEntry {
                name: empty.name.clone(),
                reason: "move list is empty".to_string(),
            });
        }
        Ok(Self { openings })
    }

    /// Loads a catalog from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::IoError`] if the file cannot be read, otherwise
    /// the same errors as [`Self::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Returns the number of openings in the database.
    #[must_use]
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    /// Returns true if the database contains no openings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// Returns all openings in the database.
    #[must_use]
    pub fn all(&self) -> &[OpeningEntry] {
        &self.openings
    }

    /// Identifies the opening played in a game.
    ///
    /// Every entry whose move list is a literal prefix of `played` is a
    /// candidate; the longest one wins. Among equally long candidates the
    /// earliest catalog entry is kept. Returns `None` for an empty move list
    /// or when nothing matches.
    #[must_use]
    pub fn detect(&self, played: &[impl AsRef<str>]) -> Option<OpeningMatch> {
        if played.is_empty() {
            return None;
        }

        let mut best: Option<&OpeningEntry> = None;
        for opening in &self.openings {
            if !opening.is_prefix_of(played) {
                continue;
            }
            if best.map_or(true, |b| opening.ply() > b.ply()) {
                best = Some(opening);
            }
        }

        best.map(OpeningMatch::from)
    }

    /// Finds all openings matching an ECO code prefix.
    ///
    /// For example, `by_eco("C5")` would match "C50", "C53", etc.
    #[must_use]
    pub fn by_eco(&self, eco_prefix: &str) -> Vec<&OpeningEntry> {
        self.openings
            .iter()
            .filter(|o| o.eco.starts_with(eco_prefix))
            .collect()
    }

    /// Searches for openings by name (case-insensitive substring match).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&OpeningEntry> {
        let query_lower = query.to_lowercase();
        self.openings
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&query_lower))
            .collect()
    }
}
