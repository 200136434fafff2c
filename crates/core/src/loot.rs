use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JokerKind {
    Shield,
    Scrambler,
    Jammer,
}

impl JokerKind {
    pub const ALL: [JokerKind; 3] = [JokerKind::Shield, JokerKind::Scrambler, JokerKind::Jammer];

    pub fn label(self) -> &'static str {
        match self {
            JokerKind::Shield => "Shield",
            JokerKind::Scrambler => "Scrambler",
            JokerKind::Jammer => "Jammer",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value")]
pub enum Loot {
    Number(u8),
    Joker(JokerKind),
}

impl Loot {
    pub fn describe(self) -> String {
        match self {
            Loot::Number(value) => format!("Number {value}"),
            Loot::Joker(kind) => kind.label().to_string(),
        }
    }
}
