use serde::{Deserialize, Serialize};

/// House rules that vary between deployments.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Rules {
    /// Award "Persistence" for any hole that took ten or more strokes.
    pub persistence_achievement: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            persistence_achievement: true,
        }
    }
}
