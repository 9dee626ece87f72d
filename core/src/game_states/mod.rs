use serde::{Deserialize, Serialize};

pub mod playing;
pub mod setup;
pub mod summary;

pub use playing::{AdvanceResult, Playing, PlayingError, RetreatResult};
pub use setup::{Setup, SetupError};
pub use summary::{Standing, Summary};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum GameState {
    Setup(Setup),
    Playing(Playing),
    /// Backed out of the first hole. Acts like `Setup`, with the round's names still filled in.
    Paused(Setup),
    Summary(Summary),
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Setup(_) => "setup",
            GameState::Playing(_) => "playing",
            GameState::Paused(_) => "paused",
            GameState::Summary(_) => "summary",
        }
    }

    /// Whether a round is underway or finished, i.e. the course is locked in.
    pub fn started(&self) -> bool {
        matches!(self, GameState::Playing(_) | GameState::Summary(_))
    }

    /// The pre-round state, for both `Setup` and `Paused`.
    pub fn setup(&self) -> Option<&Setup> {
        match self {
            GameState::Setup(s) | GameState::Paused(s) => Some(s),
            GameState::Playing(_) | GameState::Summary(_) => None,
        }
    }

    pub fn playing(&self) -> Option<&Playing> {
        match self {
            GameState::Playing(p) => Some(p),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            GameState::Summary(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Setup(Setup::new())
    }
}
