use crate::{GameOverReason, Loot, TrophyTier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    TurnStarted {
        turns_left: u32,
        hazard_chance: f64,
    },
    TreasureFound {
        loot: Loot,
    },
    ShieldSpent,
    DuplicateBusted {
        value: u8,
    },
    HazardHit {
        lives_left: u32,
    },
    Banked {
        points: u32,
        total_score: u32,
        tier: TrophyTier,
    },
    GameEnded {
        reason: GameOverReason,
        total_score: u32,
        tier: TrophyTier,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
