use anyhow::Result;
use lootflip_core::{
    Event, EventBus, GameConfig, GameOverReason, Phase, RunState, Side, TurnResult,
};
use std::collections::VecDeque;

pub const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;
const MAX_EVENT_LOG: usize = 200;
// 120 ms ticks; eight of them give roughly a one-second reveal.
const REVEAL_TICKS: u8 = 8;

/// Flip outcome currently on display. While present, input stays locked so
/// exactly one transition is ever pending.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    pub chosen: Side,
    pub ticks_left: u8,
    pub terminal: bool,
}

pub struct App {
    pub seed: u64,
    pub run: RunState,
    pub events: EventBus,
    pub event_log: VecDeque<String>,
    pub message_title: String,
    pub message_body: String,
    pub status_line: String,
    pub reveal: Option<Reveal>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(seed: u64, max_turns: Option<u32>) -> Result<Self> {
        let config = match max_turns {
            Some(turns) => GameConfig::with_max_turns(turns),
            None => GameConfig::default(),
        };
        let mut app = Self {
            seed,
            run: RunState::new(config, seed),
            events: EventBus::default(),
            event_log: VecDeque::new(),
            message_title: String::new(),
            message_body: String::new(),
            status_line: "ready".to_string(),
            reveal: None,
            show_help: false,
            should_quit: false,
        };
        app.reset_message();
        app.advance();
        Ok(app)
    }

    pub fn input_locked(&self) -> bool {
        self.reveal.is_some()
    }

    pub fn on_tick(&mut self) {
        let Some(mut reveal) = self.reveal else {
            return;
        };
        if reveal.ticks_left > 1 {
            reveal.ticks_left -= 1;
            self.reveal = Some(reveal);
            return;
        }
        self.reveal = None;
        if !reveal.terminal {
            self.advance();
        }
    }

    pub fn flip(&mut self, side: Side) {
        if self.input_locked() {
            self.push_status("wait for the reveal");
            return;
        }
        if self.run.state.phase != Phase::AwaitingFlip {
            self.push_status("no turn in play");
            return;
        }
        match self.run.flip(side, &mut self.events) {
            Ok(result) => {
                self.set_message_for(&result);
                if !matches!(result, TurnResult::GameOver { .. }) {
                    self.reveal = Some(Reveal {
                        chosen: side,
                        ticks_left: REVEAL_TICKS,
                        terminal: result.is_terminal(),
                    });
                }
            }
            Err(err) => self.push_status(format!("error: {err}")),
        }
        self.flush_events();
    }

    pub fn bank(&mut self) {
        if self.input_locked() {
            self.push_status("wait for the reveal");
            return;
        }
        if !self.run.can_bank() {
            self.push_status("nothing to bank");
            return;
        }
        match self.run.bank(&mut self.events) {
            Ok(result) => {
                self.set_message_for(&result);
                self.flush_events();
                // Banking has no reveal; the next pair is dealt right away.
                self.advance();
            }
            Err(err) => {
                self.push_status(format!("error: {err}"));
                self.flush_events();
            }
        }
    }

    pub fn restart(&mut self) {
        self.run.restart();
        self.reveal = None;
        self.reset_message();
        self.push_status("new game");
        self.advance();
    }

    pub fn game_over(&self) -> Option<(GameOverReason, u32)> {
        if self.run.state.phase != Phase::GameOver {
            return None;
        }
        // The reason is re-derivable from the state record.
        let reason = if self.run.state.lives == 0 {
            GameOverReason::Lives
        } else {
            GameOverReason::Turns
        };
        Some((reason, self.run.state.total_score))
    }

    fn advance(&mut self) {
        match self.run.start_next_turn(&mut self.events) {
            Ok(TurnResult::GameOver { .. }) | Ok(TurnResult::Ready) => {}
            Ok(other) => self.push_status(format!("unexpected result: {other:?}")),
            Err(err) => self.push_status(format!("error: {err}")),
        }
        self.flush_events();
    }

    fn reset_message(&mut self) {
        self.message_title = "Pick a card".to_string();
        self.message_body = "Build a run, then bank before you bust.".to_string();
    }

    fn set_message_for(&mut self, result: &TurnResult) {
        let (title, body) = message_for_result(result);
        self.message_title = title;
        self.message_body = body;
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.push_event_line(format_event(&event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

pub fn message_for_result(result: &TurnResult) -> (String, String) {
    match result {
        TurnResult::Ready => ("Pick a card".to_string(), String::new()),
        TurnResult::Treasure {
            loot,
            duplicate_busted,
            shield_saved,
            ..
        } => {
            if *duplicate_busted {
                (
                    "Bust!".to_string(),
                    format!("{} was a duplicate. Run lost.", loot.describe()),
                )
            } else if *shield_saved {
                (
                    "Close one!".to_string(),
                    format!("{} duplicate, your shield ate it.", loot.describe()),
                )
            } else {
                (
                    "Treasure!".to_string(),
                    format!("{} joins the run.", loot.describe()),
                )
            }
        }
        TurnResult::HazardHit { shield_saved, .. } => {
            if *shield_saved {
                (
                    "Boom, blocked!".to_string(),
                    "Shield spent. Streak reset.".to_string(),
                )
            } else {
                (
                    "Boom!".to_string(),
                    "You hit the hazard. Run lost.".to_string(),
                )
            }
        }
        TurnResult::Banked { points, .. } => ("Banked!".to_string(), format!("+{points} points")),
        TurnResult::GameOver {
            total_score,
            trophy_tier,
            ..
        } => (
            "Game over".to_string(),
            format!("Final score {total_score} ({})", trophy_tier.label()),
        ),
    }
}

pub fn format_event(event: &Event) -> String {
    match event {
        Event::TurnStarted {
            turns_left,
            hazard_chance,
        } => format!("turn ready, {turns_left} left, hazard {:.0}%", hazard_chance * 100.0),
        Event::TreasureFound { loot } => format!("treasure: {}", loot.describe()),
        Event::ShieldSpent => "shield spent".to_string(),
        Event::DuplicateBusted { value } => format!("duplicate {value}, run bust"),
        Event::HazardHit { lives_left } => format!("hazard hit, {lives_left} lives left"),
        Event::Banked {
            points,
            total_score,
            tier,
        } => format!("banked {points}, total {total_score} ({})", tier.label()),
        Event::GameEnded {
            reason,
            total_score,
            tier,
        } => format!(
            "game over ({reason:?}), score {total_score} ({})",
            tier.label()
        ),
    }
}
