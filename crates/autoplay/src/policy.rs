use crate::AutoAction;
use lootflip_core::{bank_points, hazard_probability, Phase, RunState, Side};

/// Weights for the one-step expected-value comparison behind `should_bank`.
#[derive(Debug, Clone, Copy)]
pub struct PolicyConfig {
    /// Multiplier on the expected pot loss; above 1.0 banks earlier.
    pub risk_aversion: f64,
    /// Flat point value assigned to a joker pickup.
    pub joker_value: f64,
    /// Pots below this are never worth banking.
    pub min_bank_points: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            risk_aversion: 1.0,
            joker_value: 8.0,
            min_bank_points: 20,
        }
    }
}

/// Chance the next flip lands on a hazard card: hazard presence odds times a
/// uniform side pick. Uses the live streak/jammer values, which track the
/// deal-time odds up to the jammer tick.
pub fn hit_chance(run: &RunState) -> f64 {
    hazard_probability(
        &run.config.hazard,
        run.state.streak,
        run.state.jammer_turns,
    ) * 0.5
}

/// Current unbanked pot in points.
pub fn pot_value(run: &RunState) -> u32 {
    bank_points(&run.config.bank_table, run.state.unique_count())
}

/// Points added to the pot by collecting one more unique.
pub fn marginal_bank_gain(run: &RunState) -> u32 {
    let table = &run.config.bank_table;
    let u = run.state.unique_count();
    bank_points(table, u + 1).saturating_sub(bank_points(table, u))
}

/// Probability a treasure number draw grows the unique set, counting a
/// scrambler reroll as a second try.
pub fn new_unique_chance(run: &RunState) -> f64 {
    let total = f64::from(run.config.number_values);
    let held = run.state.unique_count() as f64;
    let fresh = (total - held) / total;
    if run.state.scrambler_charges > 0 {
        fresh + (held / total) * fresh
    } else {
        fresh
    }
}

/// Expected point gain of one more flip.
pub fn expected_flip_gain(run: &RunState, policy: &PolicyConfig) -> f64 {
    let p_treasure = 1.0 - hit_chance(run);
    let number_gain = (1.0 - run.config.joker_chance)
        * new_unique_chance(run)
        * f64::from(marginal_bank_gain(run));
    let joker_gain = run.config.joker_chance * policy.joker_value;
    p_treasure * (number_gain + joker_gain)
}

/// Expected point loss of one more flip: the pot evaporates on an unshielded
/// hazard hit or an unrescued duplicate. A held shield absorbs either.
pub fn expected_flip_loss(run: &RunState) -> f64 {
    if run.state.has_shield {
        return 0.0;
    }
    let pot = f64::from(pot_value(run));
    let p_hit = hit_chance(run);
    let total = f64::from(run.config.number_values);
    let held = run.state.unique_count() as f64;
    let dup = held / total;
    let unrescued = if run.state.scrambler_charges > 0 {
        dup * dup
    } else {
        dup
    };
    p_hit * pot + (1.0 - p_hit) * (1.0 - run.config.joker_chance) * unrescued * pot
}

pub fn should_bank(run: &RunState, policy: &PolicyConfig) -> bool {
    if !run.can_bank() || pot_value(run) < policy.min_bank_points {
        return false;
    }
    expected_flip_loss(run) * policy.risk_aversion > expected_flip_gain(run, policy)
}

/// One action per call; `None` once the game is over. Sides are symmetric,
/// so the pick just alternates with the remaining budget.
pub fn choose_action(run: &RunState, policy: &PolicyConfig) -> Option<AutoAction> {
    match run.state.phase {
        Phase::GameOver => None,
        Phase::Setup | Phase::AwaitingNextTurn => Some(AutoAction::NextTurn),
        Phase::AwaitingFlip => {
            if should_bank(run, policy) {
                Some(AutoAction::Bank)
            } else {
                let side = if run.state.turns_left % 2 == 0 {
                    Side::Left
                } else {
                    Side::Right
                };
                Some(AutoAction::Flip { side })
            }
        }
    }
}
