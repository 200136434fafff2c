use crate::{GameConfig, GameState, Phase, RandomSource};
use thiserror::Error;

mod bank;
mod resolve;
mod state;
mod turn;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("banking unavailable")]
    BankUnavailable,
}

/// Single owner of one game session: configuration, the mutable state record
/// and the draw source. All transitions are synchronous and run to
/// completion; callers serialize access.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub state: GameState,
    pub rng: Box<dyn RandomSource>,
}
