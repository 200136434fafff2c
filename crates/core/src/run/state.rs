use super::*;
use crate::{
    trophy_tier, Event, EventBus, GameOverReason, RngState, TrophyTier, TurnResult,
};

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Box::new(RngState::from_seed(seed)))
    }

    pub fn from_entropy(config: GameConfig) -> Self {
        Self::with_rng(config, Box::new(RngState::from_entropy()))
    }

    pub fn with_rng(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        let state = GameState::new(&config);
        Self { config, state, rng }
    }

    /// Replaces the session state wholesale; the draw source keeps running.
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.config);
    }

    /// Banking is only possible while a turn is live and there is something
    /// to bank.
    pub fn can_bank(&self) -> bool {
        self.state.phase == Phase::AwaitingFlip
            && !self.state.uniques.is_empty()
            && self.state.lives > 0
            && self.state.turns_left > 0
    }

    pub fn trophy_tier(&self) -> TrophyTier {
        trophy_tier(&self.config.trophies, self.state.total_score)
    }

    /// Lives exhaustion takes priority when both budgets hit zero together.
    pub(super) fn check_game_over(&self) -> Option<GameOverReason> {
        if self.state.lives == 0 {
            Some(GameOverReason::Lives)
        } else if self.state.turns_left == 0 {
            Some(GameOverReason::Turns)
        } else {
            None
        }
    }

    /// Moves the session into the terminal phase, emitting the end event
    /// only on the first entry so repeated guard calls stay idempotent.
    pub(super) fn finish_game(
        &mut self,
        reason: GameOverReason,
        events: &mut EventBus,
    ) -> TurnResult {
        let tier = self.trophy_tier();
        if self.state.phase != Phase::GameOver {
            self.state.phase = Phase::GameOver;
            self.state.last_event = Some(match reason {
                GameOverReason::Lives => "Out of lives. Game over.".to_string(),
                GameOverReason::Turns => "Out of turns. Game over.".to_string(),
            });
            events.push(Event::GameEnded {
                reason,
                total_score: self.state.total_score,
                tier,
            });
        }
        TurnResult::GameOver {
            reason,
            total_score: self.state.total_score,
            trophy_tier: tier,
        }
    }
}
