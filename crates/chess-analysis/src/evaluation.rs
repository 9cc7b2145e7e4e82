//! Chess position evaluation types.

use serde::{Deserialize, Serialize};

/// Centipawn value every forced mate saturates to.
pub const MATE_SCORE: i32 = 10_000;

/// Represents a chess position evaluation.
///
/// Evaluations can be either centipawn scores (for normal positions)
/// or mate scores (when a forced mate is found).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Centipawn evaluation.
    #[serde(rename = "cp")]
    Centipawns(i32),
    /// Mate in N plies (positive = the side being scored mates).
    #[serde(rename = "mate")]
    Mate(i32),
}

impl Evaluation {
    /// Builds an evaluation from the optional `cp` / `mate` pair engines and
    /// evaluation services report. A mate score takes precedence; `None`
    /// when neither is present.
    #[must_use]
    pub fn from_parts(cp: Option<i32>, mate: Option<i32>) -> Option<Self> {
        match (cp, mate) {
            (_, Some(m)) => Some(Evaluation::Mate(m)),
            (Some(cp), None) => Some(Evaluation::Centipawns(cp)),
            (None, None) => None,
        }
    }

    /// Converts to a single signed centipawn scale.
    ///
    /// Mate scores saturate to `±MATE_SCORE` regardless of distance; only
    /// the sign matters to classification. No perspective flip is applied.
    #[must_use]
    pub fn to_centipawns(self) -> i32 {
        match self {
            Evaluation::Centipawns(cp) => cp,
            Evaluation::Mate(n) if n > 0 => MATE_SCORE,
            Evaluation::Mate(_) => -MATE_SCORE,
        }
    }
}

/// Normalizes a possibly missing evaluation. A missing or malformed score
/// is treated as neutral.
#[must_use]
pub fn normalize(evaluation: Option<Evaluation>) -> i32 {
    evaluation.map_or(0, Evaluation::to_centipawns)
}

/// One engine line: space-separated UCI moves and the score at its end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalVariation {
    pub moves: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate: Option<i32>,
}

impl PrincipalVariation {
    /// First move of the line, if any.
    #[must_use]
    pub fn first_move(&self) -> Option<&str> {
        self.moves.split_whitespace().next()
    }

    #[must_use]
    pub fn evaluation(&self) -> Option<Evaluation> {
        Evaluation::from_parts(self.cp, self.mate)
    }
}

/// Evaluation of one position as delivered by the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionEval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate: Option<i32>,
    #[serde(default)]
    pub pvs: Vec<PrincipalVariation>,
}

impl PositionEval {
    /// A centipawn evaluation without principal variations.
    #[must_use]
    pub fn centipawns(cp: i32) -> Self {
        Self {
            cp: Some(cp),
            ..Self::default()
        }
    }

    /// A mate evaluation without principal variations.
    #[must_use]
    pub fn mate(plies: i32) -> Self {
        Self {
            mate: Some(plies),
            ..Self::default()
        }
    }

    /// Appends a principal variation given as space-separated moves.
    #[must_use]
    pub fn with_pv(mut self, moves: impl Into<String>) -> Self {
        self.pvs.push(PrincipalVariation {
            moves: moves.into(),
            cp: None,
            mate: None,
        });
        self
    }

    /// The position score. Falls back to the top line's score when the
    /// position-level fields are absent.
    #[must_use]
    pub fn evaluation(&self) -> Option<Evaluation> {
        Evaluation::from_parts(self.cp, self.mate)
            .or_else(|| self.pvs.first().and_then(PrincipalVariation::evaluation))
    }

    /// The evaluator's preferred move: first move of the first line only.
    #[must_use]
    pub fn best_move(&self) -> Option<&str> {
        self.pvs.first().and_then(PrincipalVariation::first_move)
    }
}
