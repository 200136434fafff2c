use crate::{
    choose_action, AutoAction, AutoplayConfig, AutoplayError, EvalMetrics, RunStatus,
    AutoplayResult, StepRecord, SummaryStats,
};
use lootflip_core::{EventBus, GameConfig, Phase, RunState, Side, TurnResult};
use std::time::Instant;

#[derive(Debug)]
pub struct Simulator {
    pub run: RunState,
    pub events: EventBus,
}

impl Simulator {
    pub fn new(run: RunState) -> Self {
        Self {
            run,
            events: EventBus::default(),
        }
    }

    pub fn from_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(RunState::new(config, seed))
    }

    pub fn metrics(&self) -> EvalMetrics {
        EvalMetrics {
            total_score: self.run.state.total_score,
            lives: self.run.state.lives,
            turns_left: self.run.state.turns_left,
            unique_count: self.run.state.unique_count(),
            streak: self.run.state.streak,
            tier: self.run.trophy_tier(),
        }
    }

    pub fn legal_actions(&self) -> Vec<AutoAction> {
        match self.run.state.phase {
            Phase::GameOver => Vec::new(),
            Phase::Setup | Phase::AwaitingNextTurn => vec![AutoAction::NextTurn],
            Phase::AwaitingFlip => {
                let mut actions = vec![
                    AutoAction::Flip { side: Side::Left },
                    AutoAction::Flip { side: Side::Right },
                ];
                if self.run.can_bank() {
                    actions.push(AutoAction::Bank);
                }
                actions
            }
        }
    }

    /// Applies one action and drains the bus, returning the result together
    /// with the number of events the transition produced.
    pub fn apply_action(
        &mut self,
        action: &AutoAction,
    ) -> Result<(TurnResult, usize), AutoplayError> {
        let result = match action {
            AutoAction::NextTurn => self
                .run
                .start_next_turn(&mut self.events)
                .map_err(|err| AutoplayError::Run(err.to_string()))?,
            AutoAction::Flip { side } => self
                .run
                .flip(*side, &mut self.events)
                .map_err(|err| AutoplayError::Run(err.to_string()))?,
            AutoAction::Bank => self
                .run
                .bank(&mut self.events)
                .map_err(|err| AutoplayError::Run(err.to_string()))?,
        };
        let event_count = self.events.drain().count();
        Ok((result, event_count))
    }

    /// Plays the policy until the game ends or the step cap trips.
    pub fn run_policy(&mut self, cfg: &AutoplayConfig) -> Result<AutoplayResult, AutoplayError> {
        let started = Instant::now();
        let mut steps = Vec::new();

        while (steps.len() as u32) < cfg.max_steps {
            let Some(action) = choose_action(&self.run, &cfg.policy) else {
                break;
            };
            let before = self.metrics();
            let phase_before = self.run.state.phase;
            let (result, event_count) = self.apply_action(&action)?;
            steps.push(StepRecord {
                step: steps.len() as u32 + 1,
                action,
                phase_before: format!("{phase_before:?}"),
                phase_after: format!("{:?}", self.run.state.phase),
                before,
                after: self.metrics(),
                outcome: outcome_label(&result),
                event_count,
            });
        }

        let status = if self.run.state.phase == Phase::GameOver {
            RunStatus::Completed
        } else {
            RunStatus::MaxSteps
        };
        Ok(AutoplayResult {
            status,
            final_metrics: self.metrics(),
            summary: SummaryStats {
                steps: steps.len() as u32,
                wall_time_ms: started.elapsed().as_millis() as u64,
            },
            steps,
        })
    }
}

fn outcome_label(result: &TurnResult) -> String {
    match result {
        TurnResult::Ready => "ready".to_string(),
        TurnResult::Treasure {
            loot,
            duplicate_busted,
            shield_saved,
            ..
        } => {
            if *duplicate_busted {
                format!("busted on {}", loot.describe())
            } else if *shield_saved {
                format!("{} duplicate, shield spent", loot.describe())
            } else {
                format!("treasure: {}", loot.describe())
            }
        }
        TurnResult::HazardHit { shield_saved, .. } => {
            if *shield_saved {
                "hazard hit, shield spent".to_string()
            } else {
                "hazard hit, life lost".to_string()
            }
        }
        TurnResult::Banked {
            points,
            total_score,
            ..
        } => format!("banked {points} (total {total_score})"),
        TurnResult::GameOver {
            reason,
            total_score,
            trophy_tier,
        } => format!(
            "game over ({reason:?}) score {total_score} {}",
            trophy_tier.label()
        ),
    }
}
