//! Core opening types and structures.

use serde::{Deserialize, Serialize};

/// A notable game played in an opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamousGame {
    pub white: String,
    pub black: String,
    pub year: u16,
    pub result: String,
    pub event: String,
    /// Why the game is worth studying.
    pub why: String,
}

impl FamousGame {
    /// Creates a new famous game record.
    #[must_use]
    pub fn new(
        white: impl Into<String>,
        black: impl Into<String>,
        year: u16,
        result: impl Into<String>,
        event: impl Into<String>,
        why: impl Into<String>,
    ) -> Self {
        Self {
            white: white.into(),
            black: black.into(),
            year,
            result: result.into(),
            event: event.into(),
            why: why.into(),
        }
    }
}

/// Represents a chess opening with its name and move sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningEntry {
    /// The ECO code for this opening (e.g., "B20", "C44").
    pub eco: String,
    /// The name of the opening.
    pub name: String,
    /// The sequence of moves in SAN, exactly as a move generator writes them.
    pub moves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub famous_games: Vec<FamousGame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
}

impl OpeningEntry {
    /// Creates a new opening with the given ECO code, name, and SAN moves.
    #[must_use]
    pub fn new(eco: impl Into<String>, name: impl Into<String>, moves: &[&str]) -> Self {
        Self {
            eco: eco.into(),
            name: name.into(),
            moves: moves.iter().map(|m| (*m).to_string()).collect(),
            fun_fact: None,
            famous_games: Vec::new(),
            wiki_url: None,
        }
    }

    /// Sets the fun fact shown alongside the opening.
    #[must_use]
    pub fn with_fun_fact(mut self, fact: impl Into<String>) -> Self {
        self.fun_fact = Some(fact.into());
        self
    }

    /// Appends a famous game.
    #[must_use]
    pub fn with_famous_game(mut self, game: FamousGame) -> Self {
        self.famous_games.push(game);
        self
    }

    /// Sets the Wikipedia URL.
    #[must_use]
    pub fn with_wiki_url(mut self, url: impl Into<String>) -> Self {
        self.wiki_url = Some(url.into());
        self
    }

    /// Number of plies in the opening line.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if this opening's moves are a literal prefix of `played`.
    ///
    /// Comparison is exact string equality per ply; check suffixes and
    /// disambiguation are not normalized.
    #[must_use]
    pub fn is_prefix_of(&self, played: &[impl AsRef<str>]) -> bool {
        if played.len() < self.moves.len() {
            return false;
        }
        self.moves
            .iter()
            .zip(played)
            .all(|(expected, actual)| expected == actual.as_ref())
    }
}

/// The opening a game was identified as, with the number of plies matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningMatch {
    pub eco: String,
    pub name: String,
    pub ply: usize,
    pub fun_fact: Option<String>,
    pub famous_games: Vec<FamousGame>,
    pub wiki_url: Option<String>,
}

impl From<&OpeningEntry> for OpeningMatch {
    fn from(entry: &OpeningEntry) -> Self {
        Self {
            eco: entry.eco.clone(),
            name: entry.name.clone(),
            ply: entry.ply(),
            fun_fact: entry.fun_fact.clone(),
            famous_games: entry.famous_games.clone(),
            wiki_url: entry.wiki_url.clone(),
        }
    }
}
