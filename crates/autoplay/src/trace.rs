use crate::{AutoAction, AutoplayError};
use lootflip_core::TrophyTier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    MaxSteps,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub total_score: u32,
    pub lives: u32,
    pub turns_left: u32,
    pub unique_count: usize,
    pub streak: u32,
    pub tier: TrophyTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    pub action: AutoAction,
    pub phase_before: String,
    pub phase_after: String,
    pub before: EvalMetrics,
    pub after: EvalMetrics,
    pub outcome: String,
    pub event_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SummaryStats {
    pub steps: u32,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayResult {
    pub status: RunStatus,
    pub final_metrics: EvalMetrics,
    pub summary: SummaryStats,
    pub steps: Vec<StepRecord>,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status: {:?}", self.status),
            format!(
                "final: score={} tier={} lives={} turns_left={}",
                self.final_metrics.total_score,
                self.final_metrics.tier.label(),
                self.final_metrics.lives,
                self.final_metrics.turns_left
            ),
            format!(
                "summary: steps={} wall_ms={}",
                self.summary.steps, self.summary.wall_time_ms
            ),
            String::new(),
            "steps:".to_string(),
        ];
        for step in &self.steps {
            lines.push(format!(
                "  step {:>4} | {:<11} | {}",
                step.step,
                step.action.short_label(),
                step.outcome
            ));
            lines.push(format!(
                "    score {} -> {} | lives {} | turns {} -> {} | uniques {} -> {} | streak {} -> \
                 {}",
                step.before.total_score,
                step.after.total_score,
                step.after.lives,
                step.before.turns_left,
                step.after.turns_left,
                step.before.unique_count,
                step.after.unique_count,
                step.before.streak,
                step.after.streak
            ));
        }
        lines.join("\n")
    }
}

pub fn write_json(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
