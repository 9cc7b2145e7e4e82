//! Wire model of the cloud-eval API response.

use chess_analysis::{PositionEval, PrincipalVariation};
use serde::{Deserialize, Serialize};

/// One principal variation as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudPv {
    /// Space-separated UCI moves.
    pub moves: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate: Option<i32>,
}

/// A cloud evaluation of one position.
///
/// Scores are from White's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudEval {
    pub fen: String,
    /// Thousands of nodes searched.
    #[serde(default)]
    pub knodes: u64,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub pvs: Vec<CloudPv>,
}

impl CloudEval {
    /// Converts to the analysis crate's per-position record. The position
    /// score is taken from the top line.
    #[must_use]
    pub fn to_position_eval(&self) -> PositionEval {
        let top = self.pvs.first();
        PositionEval {
            cp: top.and_then(|pv| pv.cp),
            mate: top.and_then(|pv| pv.mate),
            pvs: self
                .pvs
                .iter()
                .map(|pv| PrincipalVariation {
                    moves: pv.moves.clone(),
                    cp: pv.cp,
                    mate: pv.mate,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_analysis::Evaluation;

    const START_POS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_parse_api_response() {
        let json = r#"{
            "fen": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "knodes": 13683,
            "depth": 22,
            "pvs": [
                {"moves": "e2e4 e7e5 g1f3 b8c6", "cp": 18},
                {"moves": "d2d4 d7d5 c2c4 e7e6", "cp": 16}
            ]
        }"#;
        let eval: CloudEval = serde_json::from_str(json).unwrap();
        assert_eq!(eval.fen, START_POS);
        assert_eq!(eval.depth, 22);
        assert_eq!(eval.pvs.len(), 2);

        let position = eval.to_position_eval();
        assert_eq!(position.evaluation(), Some(Evaluation::Centipawns(18)));
        assert_eq!(position.best_move(), Some("e2e4"));
        assert_eq!(position.pvs.len(), 2);
    }

    #[test]
    fn test_mate_line() {
        let json = r#"{"fen":"x","pvs":[{"moves":"d8h4","mate":-1}]}"#;
        let eval: CloudEval = serde_json::from_str(json).unwrap();
        let position = eval.to_position_eval();
        assert_eq!(position.evaluation(), Some(Evaluation::Mate(-1)));
        assert_eq!(position.mate, Some(-1));
        assert_eq!(position.cp, None);
    }

    #[test]
    fn test_no_lines() {
        let eval: CloudEval = serde_json::from_str(r#"{"fen":"x"}"#).unwrap();
        let position = eval.to_position_eval();
        assert_eq!(position.evaluation(), None);
        assert_eq!(position.best_move(), None);
    }
}
