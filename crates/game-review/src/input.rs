//! Game and position input files.

use std::path::Path;

use anyhow::{bail, Context};
use chess_analysis::{PositionEval, ReplayedMove};
use serde::Deserialize;

/// A replayed game as produced by an external move generator.
///
/// `positions[i]` is the FEN before move `i`, with the final position last,
/// so a complete file has one more position than moves. `evaluations`, when
/// present, follows the same indexing and skips fetching entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct GameFile {
    pub moves: Vec<ReplayedMove>,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub evaluations: Option<Vec<Option<PositionEval>>>,
}

impl GameFile {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid game file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Positions to evaluate, checked against the move count.
    pub fn positions_for_fetch(&self) -> anyhow::Result<&[String]> {
        if self.positions.len() != self.moves.len() + 1 {
            bail!(
                "game has {} moves but {} positions (expected {})",
                self.moves.len(),
                self.positions.len(),
                self.moves.len() + 1
            );
        }
        Ok(&self.positions)
    }
}

/// Reads FENs one per line, skipping blank lines and `#` comments.
pub fn read_fens(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_fens(&content))
}

fn parse_fens(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_analysis::Color;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GAME: &str = r#"{
        "moves": [
            {"san": "e4", "from": "e2", "to": "e4", "color": "w"},
            {"san": "c5", "from": "c7", "to": "c5", "color": "b"}
        ],
        "positions": [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
        ]
    }"#;

    #[test]
    fn test_parse_game() {
        let game = GameFile::parse(GAME).unwrap();
        assert_eq!(game.moves.len(), 2);
        assert_eq!(game.moves[1].color, Color::Black);
        assert!(game.evaluations.is_none());
        assert_eq!(game.positions_for_fetch().unwrap().len(), 3);
    }

    #[test]
    fn test_parse_game_with_evaluations() {
        let json = r#"{
            "moves": [{"san": "e4", "from": "e2", "to": "e4", "color": "w"}],
            "evaluations": [{"cp": 20, "pvs": [{"moves": "e2e4"}]}, null]
        }"#;
        let game = GameFile::parse(json).unwrap();
        let evals = game.evaluations.unwrap();
        assert_eq!(evals.len(), 2);
        assert_eq!(evals[0].as_ref().unwrap().best_move(), Some("e2e4"));
        assert!(evals[1].is_none());
    }

    #[test]
    fn test_position_count_mismatch() {
        let json = r#"{
            "moves": [{"san": "e4", "from": "e2", "to": "e4", "color": "w"}],
            "positions": ["only-one"]
        }"#;
        let game = GameFile::parse(json).unwrap();
        let err = game.positions_for_fetch().unwrap_err();
        assert!(err.to_string().contains("1 moves but 1 positions"));
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = GameFile::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid game file"));
    }

    #[test]
    fn test_parse_fens() {
        let fens = parse_fens("# opening\nfen-1\n\n  fen-2  \n");
        assert_eq!(fens, vec!["fen-1", "fen-2"]);
    }
}
