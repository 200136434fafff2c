use super::*;
use crate::{
    draw_loot, hazard_probability, Event, EventBus, Side, SlotKind, TurnResult,
};

impl RunState {
    /// Sets up the next turn: re-checks the end conditions, derives the
    /// hazard chance from the current streak/jammer, ticks the jammer down,
    /// and deals the two hidden slots.
    pub fn start_next_turn(&mut self, events: &mut EventBus) -> Result<TurnResult, RunError> {
        if let Some(reason) = self.check_game_over() {
            return Ok(self.finish_game(reason, events));
        }
        if !matches!(self.state.phase, Phase::Setup | Phase::AwaitingNextTurn) {
            return Err(RunError::InvalidPhase(self.state.phase));
        }

        let chance = hazard_probability(
            &self.config.hazard,
            self.state.streak,
            self.state.jammer_turns,
        );
        // The jammer ticks once per turn start, hazard or not.
        if self.state.jammer_turns > 0 {
            self.state.jammer_turns -= 1;
        }

        let hazard_present = self.rng.chance(chance);
        self.deal_slots(hazard_present);
        self.state.phase = Phase::AwaitingFlip;
        self.state.last_event = Some(format!("Turn ready ({} left).", self.state.turns_left));
        events.push(Event::TurnStarted {
            turns_left: self.state.turns_left,
            hazard_chance: chance,
        });
        Ok(TurnResult::Ready)
    }

    /// Resolves one flip. Every flip costs a turn, win or lose; the slots
    /// were fixed at turn start and are not re-rolled here.
    pub fn flip(&mut self, side: Side, events: &mut EventBus) -> Result<TurnResult, RunError> {
        if let Some(reason) = self.check_game_over() {
            return Ok(self.finish_game(reason, events));
        }
        if self.state.phase != Phase::AwaitingFlip {
            return Err(RunError::InvalidPhase(self.state.phase));
        }

        self.state.turns_left -= 1;
        self.state.phase = Phase::AwaitingNextTurn;

        match self.state.slot(side) {
            SlotKind::Hazard => Ok(self.resolve_hazard(events)),
            SlotKind::Treasure => {
                self.state.streak += 1;
                let loot = draw_loot(&self.config, self.rng.as_mut());
                Ok(self.resolve_loot(loot, events))
            }
        }
    }

    /// At most one slot hides the hazard; placement is a fair coin.
    fn deal_slots(&mut self, hazard_present: bool) {
        if !hazard_present {
            self.state.left_slot = SlotKind::Treasure;
            self.state.right_slot = SlotKind::Treasure;
        } else if self.rng.chance(0.5) {
            self.state.left_slot = SlotKind::Hazard;
            self.state.right_slot = SlotKind::Treasure;
        } else {
            self.state.left_slot = SlotKind::Treasure;
            self.state.right_slot = SlotKind::Hazard;
        }
    }
}
