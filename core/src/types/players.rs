use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MAX_NAME_LEN, MAX_PLAYERS};

const ADJECTIVES: &[&str] = &[
    "Brave", "Sneaky", "Lucky", "Mighty", "Clumsy", "Swift", "Noble", "Wily",
];
const CREATURES: &[&str] = &[
    "Dragon", "Wizard", "Goblin", "Knight", "Griffin", "Troll", "Phoenix", "Unicorn",
];

/// The name slots filled in before a round starts. There is always at least one slot, and never
/// more than `MAX_PLAYERS`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// A roster with a single blank slot.
    pub fn new() -> Self {
        Self {
            names: vec![String::new()],
        }
    }

    /// Pre-fill the roster from an abandoned round. An empty list still yields one slot.
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::new()
        } else {
            let mut names = names;
            names.truncate(MAX_PLAYERS);
            Self { names }
        }
    }

    pub fn names(&self) -> &'_ [String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add a blank slot at the end, returning the new `Roster` and the index of the slot.
    pub fn add_player(&self) -> Result<(Self, usize), RosterError> {
        if self.names.len() >= MAX_PLAYERS {
            return Err(RosterError::TooManyPlayers);
        }
        let mut self_ = self.clone();
        self_.names.push(String::new());
        Ok((self_, self.names.len()))
    }

    /// Remove the slot at `index`. The last remaining slot can't be removed.
    pub fn remove_player(&self, index: usize) -> Result<Self, RosterError> {
        if index >= self.names.len() {
            return Err(RosterError::PlayerDoesntExist);
        }
        if self.names.len() == 1 {
            return Err(RosterError::LastPlayer);
        }
        let mut self_ = self.clone();
        self_.names.remove(index);
        Ok(self_)
    }

    /// Replace the raw text in the slot at `index`.
    pub fn set_name(&self, index: usize, name: String) -> Result<Self, RosterError> {
        let mut self_ = self.clone();
        let slot = self_
            .names
            .get_mut(index)
            .ok_or(RosterError::PlayerDoesntExist)?;
        *slot = name;
        Ok(self_)
    }

    /// The names a round would start with: trimmed, capped, and with blank slots replaced by a
    /// generated placeholder.
    pub fn resolved_names<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        self.names
            .iter()
            .map(|n| {
                let name = normalize_name(n);
                if name.is_empty() {
                    placeholder_name(rng)
                } else {
                    name
                }
            })
            .collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim surrounding whitespace and cap the name at `MAX_NAME_LEN` characters.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().chars().take(MAX_NAME_LEN).collect::<String>().trim_end().to_string()
}

/// A themed stand-in for a player who didn't enter a name, e.g. "Lucky Goblin".
pub fn placeholder_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Mystery");
    let creature = CREATURES.choose(rng).copied().unwrap_or("Golfer");
    format!("{} {}", adjective, creature)
}

#[derive(Error, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum RosterError {
    #[error("Player does not exist")]
    PlayerDoesntExist,
    #[error("Maximum 6 players allowed")]
    TooManyPlayers,
    #[error("At least one player required")]
    LastPlayer,
}
