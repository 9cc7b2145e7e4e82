//! Chess game review: evaluation normalization and move quality classification.
//!
//! This crate turns per-position evaluations into a classified review of a
//! game. It does not generate moves or evaluate positions itself; moves come
//! from an external move generator and evaluations from an engine or a cloud
//! evaluation service.
//!
//! # Overview
//!
//! - [`Evaluation`] - Position evaluation (centipawn or mate score)
//! - [`MoveTier`] - Classification of move quality (Brilliant, Best, Good, etc.)
//! - [`classify`] - Rule-based classifier over centipawn loss
//! - [`GameAnalyzer`] - Analyzes complete games and identifies the opening
//!
//! # Example
//!
//! ```
//! use chess_analysis::{Color, GameAnalyzer, PositionEval, ReplayedMove};
//!
//! let moves = vec![
//!     ReplayedMove::new("e4", "e2", "e4", Color::White),
//!     ReplayedMove::new("c5", "c7", "c5", Color::Black),
//! ];
//! let evals = vec![
//!     Some(PositionEval::centipawns(20)),
//!     Some(PositionEval::centipawns(15)),
//!     Some(PositionEval::centipawns(10)),
//! ];
//!
//! let analysis = GameAnalyzer::default().analyze(&moves, &evals)?;
//! assert_eq!(analysis.opening.unwrap().name, "Sicilian Defense");
//! # Ok::<(), chess_analysis::AnalyzerError>(())
//! ```

pub mod analyzer;
pub mod evaluation;
pub mod quality;

pub use analyzer::{
    AnalyzedMove, AnalyzerError, Color, GameAnalysis, GameAnalyzer, MoveContext, NoContext,
    ReplayedMove,
};
pub use evaluation::{normalize, Evaluation, PositionEval, PrincipalVariation, MATE_SCORE};
pub use quality::{classify, Classification, ClassifyInput, MoveTier, PlayerStats, TierCounts};
