use crate::GameConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SlotKind {
    Treasure,
    Hazard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    AwaitingFlip,
    AwaitingNextTurn,
    GameOver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOverReason {
    Lives,
    Turns,
}

/// The mutable record of one game session: permanent score plus the
/// run-scoped fields cleared together on every run reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub lives: u32,
    pub total_score: u32,
    pub turns_left: u32,
    pub max_turns: u32,
    pub streak: u32,
    pub uniques: BTreeSet<u8>,
    pub has_shield: bool,
    pub scrambler_charges: u8,
    pub jammer_turns: u32,
    pub left_slot: SlotKind,
    pub right_slot: SlotKind,
    pub phase: Phase,
    #[serde(default)]
    pub last_event: Option<String>,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            lives: config.starting_lives,
            total_score: 0,
            turns_left: config.max_turns,
            max_turns: config.max_turns,
            streak: 0,
            uniques: BTreeSet::new(),
            has_shield: false,
            scrambler_charges: 0,
            jammer_turns: 0,
            left_slot: SlotKind::Treasure,
            right_slot: SlotKind::Treasure,
            phase: Phase::Setup,
            last_event: None,
        }
    }

    pub fn slot(&self, side: Side) -> SlotKind {
        match side {
            Side::Left => self.left_slot,
            Side::Right => self.right_slot,
        }
    }

    pub fn unique_count(&self) -> usize {
        self.uniques.len()
    }

    pub fn hazard_side(&self) -> Option<Side> {
        if self.left_slot == SlotKind::Hazard {
            Some(Side::Left)
        } else if self.right_slot == SlotKind::Hazard {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Clears the run-scoped fields together. Lives, turn budget and banked
    /// score are untouched; partial resets are not a thing.
    pub fn reset_run(&mut self) {
        self.streak = 0;
        self.uniques.clear();
        self.has_shield = false;
        self.scrambler_charges = 0;
        self.jammer_turns = 0;
    }
}
