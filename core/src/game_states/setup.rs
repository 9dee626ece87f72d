use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game_states::playing::Playing;
use crate::types::{normalize_name, CourseId, Player, Roster, RosterError, Round, MAX_PLAYERS};

/// Before a round starts, a course is picked and the roster is filled in. This is also where an
/// abandoned round lands, with its player names left in the roster for review.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Setup {
    course: CourseId,
    roster: Roster,
}

impl Setup {
    pub fn new() -> Self {
        Self {
            course: CourseId::default(),
            roster: Roster::new(),
        }
    }

    pub fn prefilled(course: CourseId, names: Vec<String>) -> Self {
        Self {
            course,
            roster: Roster::from_names(names),
        }
    }

    pub fn course(&self) -> CourseId {
        self.course
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn select_course(&self, course: CourseId) -> Setup {
        Self {
            course,
            roster: self.roster.clone(),
        }
    }

    pub fn add_player(&self) -> Result<(Setup, usize), SetupError> {
        let (roster, index) = self.roster.add_player()?;
        Ok((
            Self {
                course: self.course,
                roster,
            },
            index,
        ))
    }

    pub fn remove_player(&self, index: usize) -> Result<Setup, SetupError> {
        Ok(Self {
            course: self.course,
            roster: self.roster.remove_player(index)?,
        })
    }

    pub fn set_name(&self, index: usize, name: String) -> Result<Setup, SetupError> {
        Ok(Self {
            course: self.course,
            roster: self.roster.set_name(index, name)?,
        })
    }

    /// Start the round on the selected course with one player per name, in the given order.
    /// Names are expected to be resolved already (see `Roster::resolved_names`); they are only
    /// re-capped here.
    pub fn start_round(&self, names: Vec<String>) -> Result<Playing, SetupError> {
        if names.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if names.len() > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers);
        }
        let players = names
            .iter()
            .map(|n| Player::new(normalize_name(n)))
            .collect();
        Ok(Playing::new(Round {
            course: self.course,
            players,
            hole: 0,
        }))
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SetupError {
    #[error("At least one player required")]
    NoPlayers,
    #[error("Maximum 6 players allowed")]
    TooManyPlayers,
    #[error("{0}")]
    Roster(#[from] RosterError),
}
