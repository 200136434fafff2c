use super::*;
use crate::{draw_number, Event, EventBus, JokerKind, Loot, TurnResult};

impl RunState {
    pub(super) fn resolve_hazard(&mut self, events: &mut EventBus) -> TurnResult {
        if self.state.has_shield {
            self.state.has_shield = false;
            self.state.streak = 0;
            self.state.last_event = Some("Hazard hit, shield spent. Streak reset.".to_string());
            events.push(Event::ShieldSpent);
            return self.hazard_result(true, events);
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        self.state.reset_run();
        events.push(Event::HazardHit {
            lives_left: self.state.lives,
        });
        self.state.last_event = Some(if self.state.lives == 0 {
            "Hazard hit. Game over.".to_string()
        } else {
            "Hazard hit. Lost a life, run reset.".to_string()
        });
        self.hazard_result(false, events)
    }

    pub(super) fn resolve_loot(&mut self, loot: Loot, events: &mut EventBus) -> TurnResult {
        match loot {
            Loot::Joker(kind) => {
                self.apply_joker(kind);
                events.push(Event::TreasureFound { loot });
                self.treasure_result(loot, false, false, events)
            }
            Loot::Number(value) => self.resolve_number(value, events),
        }
    }

    fn resolve_number(&mut self, value: u8, events: &mut EventBus) -> TurnResult {
        if self.state.uniques.insert(value) {
            self.state.last_event = Some(format!("Loot: number {value} (new)."));
            events.push(Event::TreasureFound {
                loot: Loot::Number(value),
            });
            return self.treasure_result(Loot::Number(value), false, false, events);
        }

        if self.state.has_shield {
            self.state.has_shield = false;
            self.state.last_event = Some(format!("Loot: number {value} duplicate, shield spent."));
            events.push(Event::ShieldSpent);
            return self.treasure_result(Loot::Number(value), false, true, events);
        }

        if self.state.scrambler_charges > 0 {
            return self.reroll_duplicate(value, events);
        }

        self.bust(value, events)
    }

    fn reroll_duplicate(&mut self, duplicate: u8, events: &mut EventBus) -> TurnResult {
        self.state.scrambler_charges -= 1;
        let reroll = draw_number(&self.config, self.rng.as_mut());
        if self.state.uniques.insert(reroll) {
            self.state.last_event = Some(format!(
                "Loot: duplicate {duplicate}, scrambler rerolled to {reroll} (new)."
            ));
            events.push(Event::TreasureFound {
                loot: Loot::Number(reroll),
            });
            return self.treasure_result(Loot::Number(reroll), false, false, events);
        }
        // A failed reroll busts and reports the original draw, not the reroll.
        self.state.last_event = Some(format!(
            "Loot: duplicate {duplicate}, scrambler reroll also duplicate ({reroll}). Run bust."
        ));
        self.bust_silent(duplicate, events)
    }

    fn bust(&mut self, value: u8, events: &mut EventBus) -> TurnResult {
        self.state.last_event = Some(format!("Loot: number {value} duplicate. Run bust."));
        self.bust_silent(value, events)
    }

    fn bust_silent(&mut self, value: u8, events: &mut EventBus) -> TurnResult {
        self.state.reset_run();
        events.push(Event::DuplicateBusted { value });
        self.treasure_result(Loot::Number(value), true, false, events)
    }

    fn apply_joker(&mut self, kind: JokerKind) {
        match kind {
            JokerKind::Shield => {
                if !self.state.has_shield {
                    self.state.has_shield = true;
                    self.state.last_event = Some("Loot: shield acquired.".to_string());
                } else {
                    // A second shield never stacks; it converts into a charge.
                    self.add_scrambler_charges(1);
                    self.state.last_event =
                        Some("Loot: spare shield converted to a scrambler charge.".to_string());
                }
            }
            JokerKind::Scrambler => {
                self.add_scrambler_charges(self.config.scrambler_pickup);
                self.state.last_event = Some(format!(
                    "Loot: scrambler (+{} charges).",
                    self.config.scrambler_pickup
                ));
            }
            JokerKind::Jammer => {
                // Overwrites any remaining duration rather than stacking.
                self.state.jammer_turns = self.config.jammer_duration;
                self.state.last_event = Some(format!(
                    "Loot: jammer (hazard odds reduced for {} turns).",
                    self.config.jammer_duration
                ));
            }
        }
    }

    fn add_scrambler_charges(&mut self, amount: u8) {
        self.state.scrambler_charges = self
            .state
            .scrambler_charges
            .saturating_add(amount)
            .min(self.config.scrambler_cap);
    }

    fn treasure_result(
        &mut self,
        loot: Loot,
        duplicate_busted: bool,
        shield_saved: bool,
        events: &mut EventBus,
    ) -> TurnResult {
        let over = self.check_game_over();
        if let Some(reason) = over {
            let _ = self.finish_game(reason, events);
        }
        TurnResult::Treasure {
            loot,
            duplicate_busted,
            shield_saved,
            game_over: over.is_some(),
            turns_left: self.state.turns_left,
        }
    }

    fn hazard_result(&mut self, shield_saved: bool, events: &mut EventBus) -> TurnResult {
        let over = self.check_game_over();
        if let Some(reason) = over {
            let _ = self.finish_game(reason, events);
        }
        TurnResult::HazardHit {
            shield_saved,
            game_over: over.is_some(),
            reason: over,
            turns_left: self.state.turns_left,
        }
    }
}
