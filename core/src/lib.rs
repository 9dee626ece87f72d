//! Scorekeeping for an 18-hole themed mini-golf round: course selection, per-hole stroke entry,
//! and a ranked leaderboard with achievements at the end.

pub mod config;
pub mod game;
pub mod game_states;
pub mod narrative;
pub mod persistence;
pub mod scoring;
pub mod types;

pub use config::Rules;
pub use game::{Game, GameError, Intent};
pub use game_states::GameState;
pub use persistence::{KeyValueStore, MemoryStore, Persistence, StoreError};
