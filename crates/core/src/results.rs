use crate::{GameOverReason, Loot, TrophyTier};
use serde::{Deserialize, Serialize};

/// Outcome of a single transition, returned by value and never retained by
/// the engine. Treasure/hazard variants embed the post-mutation game-over
/// check so the caller can end the game without a second query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum TurnResult {
    Ready,
    Treasure {
        loot: Loot,
        duplicate_busted: bool,
        shield_saved: bool,
        game_over: bool,
        turns_left: u32,
    },
    HazardHit {
        shield_saved: bool,
        game_over: bool,
        reason: Option<GameOverReason>,
        turns_left: u32,
    },
    Banked {
        points: u32,
        total_score: u32,
        trophy_tier: TrophyTier,
    },
    GameOver {
        reason: GameOverReason,
        total_score: u32,
        trophy_tier: TrophyTier,
    },
}

impl TurnResult {
    /// True when no further flips can follow this result.
    pub fn is_terminal(&self) -> bool {
        match self {
            TurnResult::Ready | TurnResult::Banked { .. } => false,
            TurnResult::Treasure { game_over, .. } => *game_over,
            TurnResult::HazardHit { game_over, .. } => *game_over,
            TurnResult::GameOver { .. } => true,
        }
    }
}
