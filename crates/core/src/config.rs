use serde::{Deserialize, Serialize};

/// Hazard odds for the upcoming turn: base chance plus a per-streak ramp,
/// clamped to [base, cap]; an active jammer subtracts `jammer_relief`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HazardCurve {
    pub base: f64,
    pub per_streak: f64,
    pub cap: f64,
    pub jammer_relief: f64,
}

impl Default for HazardCurve {
    fn default() -> Self {
        Self {
            base: 0.20,
            per_streak: 0.06,
            cap: 0.56,
            jammer_relief: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrophyThresholds {
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
}

impl Default for TrophyThresholds {
    fn default() -> Self {
        Self {
            bronze: 100,
            silver: 150,
            gold: 230,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_lives: u32,
    pub max_turns: u32,
    /// Chance that a treasure flip yields a joker instead of a number.
    pub joker_chance: f64,
    /// Numbered loot is drawn uniformly from 1..=number_values.
    pub number_values: u8,
    pub scrambler_cap: u8,
    /// Charges granted by a scrambler pickup.
    pub scrambler_pickup: u8,
    /// Turns of reduced hazard odds granted by a jammer pickup.
    pub jammer_duration: u32,
    pub hazard: HazardCurve,
    /// Bank payout indexed by unique count; the last entry includes the
    /// full-set bonus.
    pub bank_table: Vec<u32>,
    pub trophies: TrophyThresholds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            max_turns: 40,
            joker_chance: 0.15,
            number_values: 7,
            scrambler_cap: 4,
            scrambler_pickup: 2,
            jammer_duration: 3,
            hazard: HazardCurve::default(),
            bank_table: vec![0, 1, 5, 20, 40, 80, 110, 150],
            trophies: TrophyThresholds::default(),
        }
    }
}

impl GameConfig {
    pub fn with_max_turns(max_turns: u32) -> Self {
        Self {
            max_turns,
            ..Self::default()
        }
    }
}
