use lootflip_core::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AutoAction {
    NextTurn,
    Flip { side: Side },
    Bank,
}

impl AutoAction {
    pub fn stable_key(&self) -> String {
        match self {
            Self::NextTurn => "next_turn".to_string(),
            Self::Flip { side } => format!("flip:{side:?}"),
            Self::Bank => "bank".to_string(),
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::NextTurn => "next_turn".to_string(),
            Self::Flip { side: Side::Left } => "flip left".to_string(),
            Self::Flip { side: Side::Right } => "flip right".to_string(),
            Self::Bank => "bank".to_string(),
        }
    }
}
