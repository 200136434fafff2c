use crate::TrophyThresholds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrophyTier {
    None,
    Bronze,
    Silver,
    Gold,
}

impl TrophyTier {
    pub fn label(self) -> &'static str {
        match self {
            TrophyTier::None => "-",
            TrophyTier::Bronze => "Bronze",
            TrophyTier::Silver => "Silver",
            TrophyTier::Gold => "Gold",
        }
    }
}

pub fn trophy_tier(thresholds: &TrophyThresholds, total_score: u32) -> TrophyTier {
    if total_score >= thresholds.gold {
        TrophyTier::Gold
    } else if total_score >= thresholds.silver {
        TrophyTier::Silver
    } else if total_score >= thresholds.bronze {
        TrophyTier::Bronze
    } else {
        TrophyTier::None
    }
}

/// Bank payout for a unique-collectible count. Counts beyond the table pay
/// the top entry.
pub fn bank_points(table: &[u32], unique_count: usize) -> u32 {
    table
        .get(unique_count)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(0)
}
