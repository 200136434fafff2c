//! Core game rules. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod events;
pub mod loot;
pub mod odds;
pub mod results;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod state;

pub use config::*;
pub use events::*;
pub use loot::*;
pub use odds::*;
pub use results::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use state::*;
