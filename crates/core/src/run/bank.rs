use super::*;
use crate::{bank_points, Event, EventBus, TurnResult};

impl RunState {
    /// Converts the run's unique set into permanent score and resets the
    /// run. Banking never costs a turn and never ends the game by itself;
    /// the caller's next `start_next_turn` reports exhaustion if the budget
    /// was already spent.
    pub fn bank(&mut self, events: &mut EventBus) -> Result<TurnResult, RunError> {
        if !self.can_bank() {
            return Err(RunError::BankUnavailable);
        }

        let unique_count = self.state.unique_count();
        let points = bank_points(&self.config.bank_table, unique_count);
        self.state.total_score += points;
        let tier = self.trophy_tier();
        self.state.reset_run();
        self.state.phase = Phase::AwaitingNextTurn;
        self.state.last_event = Some(format!("Banked {points} points (u={unique_count})."));
        events.push(Event::Banked {
            points,
            total_score: self.state.total_score,
            tier,
        });
        Ok(TurnResult::Banked {
            points,
            total_score: self.state.total_score,
            trophy_tier: tier,
        })
    }
}
