//! Move quality classification.
//!
//! Classification walks an ordered rule table; the first rule whose guard
//! holds decides the tier. The order is the tie-break priority
//! (brilliant > great > best > good > ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum evaluation swing for a best move to count as great.
pub const GREAT_SWING_THRESHOLD: i32 = 300;
/// Centipawn loss below which a move is still good.
pub const GOOD_LIMIT: u32 = 50;
/// Centipawn loss below which a move is an inaccuracy.
pub const INACCURACY_LIMIT: u32 = 100;
/// Centipawn loss below which a move is a mistake; at or above it, a blunder.
pub const MISTAKE_LIMIT: u32 = 200;

/// Classification of move quality based on evaluation loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveTier {
    /// Best move that sacrifices material
    Brilliant,
    /// Best move in a critical position (large evaluation swing)
    Great,
    /// The engine's top move, or no evaluation lost
    Best,
    /// Small centipawn loss
    Good,
    /// Noticeable centipawn loss
    Inaccuracy,
    /// Significant centipawn loss
    Mistake,
    /// Major centipawn loss
    Blunder,
}

impl MoveTier {
    /// All tiers, from best to worst.
    pub const ALL: [MoveTier; 7] = [
        MoveTier::Brilliant,
        MoveTier::Great,
        MoveTier::Best,
        MoveTier::Good,
        MoveTier::Inaccuracy,
        MoveTier::Mistake,
        MoveTier::Blunder,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MoveTier::Brilliant => "brilliant",
            MoveTier::Great => "great",
            MoveTier::Best => "best",
            MoveTier::Good => "good",
            MoveTier::Inaccuracy => "inaccuracy",
            MoveTier::Mistake => "mistake",
            MoveTier::Blunder => "blunder",
        }
    }

    /// Tiers whose reported centipawn loss is always zero.
    #[must_use]
    pub fn is_top_move(self) -> bool {
        matches!(self, MoveTier::Brilliant | MoveTier::Great | MoveTier::Best)
    }
}

impl fmt::Display for MoveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the classifier looks at for one move. Evaluations are already
/// normalized to centipawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyInput {
    pub eval_before: i32,
    pub eval_after: i32,
    pub is_best_move: bool,
    pub is_sacrifice: bool,
    pub eval_swing: i32,
}

impl ClassifyInput {
    /// Absolute difference between the two evaluations.
    #[must_use]
    pub fn cp_loss(&self) -> u32 {
        self.eval_before.abs_diff(self.eval_after)
    }
}

/// Result of classifying one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(rename = "classification")]
    pub tier: MoveTier,
    pub cp_loss: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_swing: Option<i32>,
}

struct Rule {
    tier: MoveTier,
    applies: fn(&ClassifyInput, u32) -> bool,
}

/// Checked in order; the first rule that applies decides the tier.
///
/// Zero loss short-circuits to `Best` even when the engine preferred another
/// move, so equal evaluations never grade as `Good`.
const RULES: [Rule; 7] = [
    Rule {
        tier: MoveTier::Brilliant,
        applies: |i, _| i.is_best_move && i.is_sacrifice,
    },
    Rule {
        tier: MoveTier::Great,
        applies: |i, _| i.is_best_move && i.eval_swing >= GREAT_SWING_THRESHOLD,
    },
    Rule {
        tier: MoveTier::Best,
        applies: |i, loss| i.is_best_move || loss == 0,
    },
    Rule {
        tier: MoveTier::Good,
        applies: |_, loss| loss < GOOD_LIMIT,
    },
    Rule {
        tier: MoveTier::Inaccuracy,
        applies: |_, loss| loss < INACCURACY_LIMIT,
    },
    Rule {
        tier: MoveTier::Mistake,
        applies: |_, loss| loss < MISTAKE_LIMIT,
    },
    Rule {
        tier: MoveTier::Blunder,
        applies: |_, _| true,
    },
];

/// Classifies a move. Total over its input domain.
#[must_use]
pub fn classify(input: &ClassifyInput) -> Classification {
    let loss = input.cp_loss();
    let tier = RULES
        .iter()
        .find(|rule| (rule.applies)(input, loss))
        .map_or(MoveTier::Blunder, |rule| rule.tier);

    Classification {
        tier,
        cp_loss: if tier.is_top_move() { 0 } else { loss },
        eval_swing: (tier == MoveTier::Great).then_some(input.eval_swing),
    }
}

/// Number of classified moves per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub brilliant: u32,
    pub great: u32,
    pub best: u32,
    pub good: u32,
    pub inaccuracy: u32,
    pub mistake: u32,
    pub blunder: u32,
}

impl TierCounts {
    pub fn record(&mut self, tier: MoveTier) {
        *self.slot(tier) += 1;
    }

    #[must_use]
    pub fn get(&self, tier: MoveTier) -> u32 {
        match tier {
            MoveTier::Brilliant => self.brilliant,
            MoveTier::Great => self.great,
            MoveTier::Best => self.best,
            MoveTier::Good => self.good,
            MoveTier::Inaccuracy => self.inaccuracy,
            MoveTier::Mistake => self.mistake,
            MoveTier::Blunder => self.blunder,
        }
    }

    /// Total number of classified moves.
    #[must_use]
    pub fn total(&self) -> u32 {
        MoveTier::ALL.iter().map(|t| self.get(*t)).sum()
    }

    fn slot(&mut self, tier: MoveTier) -> &mut u32 {
        match tier {
            MoveTier::Brilliant => &mut self.brilliant,
            MoveTier::Great => &mut self.great,
            MoveTier::Best => &mut self.best,
            MoveTier::Good => &mut self.good,
            MoveTier::Inaccuracy => &mut self.inaccuracy,
            MoveTier::Mistake => &mut self.mistake,
            MoveTier::Blunder => &mut self.blunder,
        }
    }
}

/// Statistics for one side's classified moves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Per-tier counts
    pub counts: TierCounts,
    /// Average reported centipawn loss over classified moves
    pub avg_cp_loss: f64,
}

impl PlayerStats {
    /// Builds statistics from a player's classifications.
    pub fn from_classifications<'a>(
        classifications: impl IntoIterator<Item = &'a Classification>,
    ) -> Self {
        let mut counts = TierCounts::default();
        let mut total_loss: u64 = 0;
        for c in classifications {
            counts.record(c.tier);
            total_loss += u64::from(c.cp_loss);
        }

        let moves = counts.total();
        let avg_cp_loss = if moves == 0 {
            0.0
        } else {
            total_loss as f64 / f64::from(moves)
        };

        Self {
            counts,
            avg_cp_loss,
        }
    }
}
