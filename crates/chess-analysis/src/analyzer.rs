//! Game analysis with move quality classification.
//!
//! This module provides the [`GameAnalyzer`] for analyzing complete chess games:
//! it pairs each move with the evaluations around it, classifies it, identifies
//! the opening and tallies the results.

use chess_openings::{OpeningDatabase, OpeningMatch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluation::{normalize, Evaluation, PositionEval};
use crate::quality::{classify, Classification, ClassifyInput, PlayerStats, TierCounts};

/// Errors that can occur during game analysis.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Invalid game data was provided.
    #[error("Invalid game data: {0}")]
    InvalidGame(String),
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "w", alias = "white")]
    White,
    #[serde(rename = "b", alias = "black")]
    Black,
}

/// A move as produced by the external move generator while replaying a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayedMove {
    /// The move in SAN (e.g., "Nf3").
    pub san: String,
    /// Origin square (e.g., "g1").
    pub from: String,
    /// Destination square (e.g., "f3").
    pub to: String,
    pub color: Color,
    /// Promotion piece in lowercase (e.g., 'q').
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<char>,
}

impl ReplayedMove {
    pub fn new(
        san: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            san: san.into(),
            from: from.into(),
            to: to.into(),
            color,
            promotion: None,
        }
    }

    /// The move in UCI notation (e.g., "e7e8q").
    #[must_use]
    pub fn uci(&self) -> String {
        let mut uci = format!("{}{}", self.from, self.to);
        if let Some(piece) = self.promotion {
            uci.push(piece);
        }
        uci
    }
}

/// Caller-supplied knowledge the evaluations alone do not carry.
///
/// Sacrifice and swing detection are not implemented here; the default
/// methods report "no sacrifice" and "no swing".
pub trait MoveContext {
    /// Whether the move at `ply` gives up material.
    fn is_sacrifice(&self, _ply: usize, _mv: &ReplayedMove) -> bool {
        false
    }

    /// Size of the evaluation swing around the move at `ply`.
    fn eval_swing(&self, _ply: usize, _eval_before: i32, _eval_after: i32) -> i32 {
        0
    }
}

/// A [`MoveContext`] with nothing to add.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl MoveContext for NoContext {}

/// Analysis result for a single move.
///
/// Moves lacking an evaluation on either side carry no classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedMove {
    /// Zero-based ply index
    pub ply: usize,
    /// Full-move number, starting at 1
    pub move_number: usize,
    pub san: String,
    pub from: String,
    pub to: String,
    pub color: Color,
    #[serde(flatten)]
    pub classification: Option<Classification>,
    /// Evaluation of the position after the move
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    /// Normalized evaluation after the move
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_after_cp: Option<i32>,
    /// The evaluator's preferred move, reported only when it was not played
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_move: Option<String>,
}

/// Complete analysis of a chess game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAnalysis {
    /// Every move of the game, classified or not
    pub moves: Vec<AnalyzedMove>,
    pub opening: Option<OpeningMatch>,
    /// Per-tier counts over classified moves only
    pub stats: TierCounts,
    pub white_stats: PlayerStats,
    pub black_stats: PlayerStats,
    pub total_moves: usize,
}

/// Analyzes chess games to classify move quality.
///
/// Holds a read-only handle to the opening catalog so one analyzer can be
/// shared across requests.
#[derive(Debug, Clone, Copy)]
pub struct GameAnalyzer<'a> {
    openings: &'a OpeningDatabase,
}

impl Default for GameAnalyzer<'static> {
    fn default() -> Self {
        Self::new(OpeningDatabase::builtin())
    }
}

impl<'a> GameAnalyzer<'a> {
    /// Creates an analyzer that identifies openings from `openings`.
    #[must_use]
    pub fn new(openings: &'a OpeningDatabase) -> Self {
        Self { openings }
    }

    /// Analyzes a game without sacrifice or swing information.
    ///
    /// See [`Self::analyze_with`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidGame`] if the input is malformed.
    pub fn analyze(
        &self,
        moves: &[ReplayedMove],
        evaluations: &[Option<PositionEval>],
    ) -> Result<GameAnalysis, AnalyzerError> {
        self.analyze_with(moves, evaluations, &NoContext)
    }

    /// Analyzes a complete chess game.
    ///
    /// `evaluations[i]` is the position before move `i` and
    /// `evaluations[i + 1]` the position after it, so a fully evaluated
    /// game has one more evaluation than moves. A move whose before- or
    /// after-evaluation is missing is kept in the output unclassified and
    /// left out of the tallies.
    ///
    /// For each classified move:
    /// 1. Both evaluations are normalized to centipawns.
    /// 2. The move counts as best when it matches the first move of the
    ///    first principal variation before it, in SAN or UCI. Without a
    ///    principal variation the played move is assumed best.
    /// 3. The move is classified by centipawn loss.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidGame`] before doing any work if a move
    /// is malformed or there are more evaluations than positions.
    pub fn analyze_with<C: MoveContext>(
        &self,
        moves: &[ReplayedMove],
        evaluations: &[Option<PositionEval>],
        context: &C,
    ) -> Result<GameAnalysis, AnalyzerError> {
        validate(moves, evaluations)?;

        let mut analyzed = Vec::with_capacity(moves.len());
        for (ply, mv) in moves.iter().enumerate() {
            let before = evaluations.get(ply).and_then(Option::as_ref);
            let after = evaluations.get(ply + 1).and_then(Option::as_ref);

            let mut record = AnalyzedMove {
                ply,
                move_number: ply / 2 + 1,
                san: mv.san.clone(),
                from: mv.from.clone(),
                to: mv.to.clone(),
                color: mv.color,
                classification: None,
                evaluation: None,
                eval_after_cp: None,
                best_move: None,
            };

            if let (Some(before), Some(after)) = (before, after) {
                let eval_before = normalize(before.evaluation());
                let eval_after = normalize(after.evaluation());

                let best = before.best_move().unwrap_or(&mv.san);
                let is_best_move = mv.san == best || mv.uci() == best;

                let classification = classify(&ClassifyInput {
                    eval_before,
                    eval_after,
                    is_best_move,
                    is_sacrifice: context.is_sacrifice(ply, mv),
                    eval_swing: context.eval_swing(ply, eval_before, eval_after),
                });

                record.classification = Some(classification);
                record.evaluation = after.evaluation();
                record.eval_after_cp = Some(eval_after);
                record.best_move = (!is_best_move).then(|| best.to_string());
            } else {
                tracing::debug!(ply, san = %mv.san, "missing evaluation, move left unclassified");
            }

            analyzed.push(record);
        }

        let sans: Vec<&str> = moves.iter().map(|m| m.san.as_str()).collect();
        let opening = self.openings.detect(&sans);

        let mut stats = TierCounts::default();
        for c in analyzed.iter().filter_map(|m| m.classification.as_ref()) {
            stats.record(c.tier);
        }
        let white_stats = side_stats(&analyzed, Color::White);
        let black_stats = side_stats(&analyzed, Color::Black);

        tracing::debug!(
            moves = analyzed.len(),
            classified = stats.total(),
            opening = opening.as_ref().map(|o| o.name.as_str()),
            "game analyzed"
        );

        Ok(GameAnalysis {
            total_moves: analyzed.len(),
            moves: analyzed,
            opening,
            stats,
            white_stats,
            black_stats,
        })
    }
}

fn side_stats(moves: &[AnalyzedMove], color: Color) -> PlayerStats {
    PlayerStats::from_classifications(
        moves
            .iter()
            .filter(|m| m.color == color)
            .filter_map(|m| m.classification.as_ref()),
    )
}

fn is_square(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 2 && (b'a'..=b'h').contains(&b[0]) && (b'1'..=b'8').contains(&b[1])
}

/// Rejects malformed input before any processing begins.
fn validate(
    moves: &[ReplayedMove],
    evaluations: &[Option<PositionEval>],
) -> Result<(), AnalyzerError> {
    for (ply, mv) in moves.iter().enumerate() {
        if mv.san.trim().is_empty() {
            return Err(AnalyzerError::InvalidGame(format!(
                "move {ply} has an empty SAN"
            )));
        }
        if !is_square(&mv.from) || !is_square(&mv.to) {
            return Err(AnalyzerError::InvalidGame(format!(
                "move {ply} ({}) has invalid squares {}-{}",
                mv.san, mv.from, mv.to
            )));
        }
    }
    if evaluations.len() > moves.len() + 1 {
        return Err(AnalyzerError::InvalidGame(format!(
            "{} evaluations for {} moves (at most {} positions)",
            evaluations.len(),
            moves.len(),
            moves.len() + 1
        )));
    }
    Ok(())
}
