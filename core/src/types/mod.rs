//! Generic types used throughout the core codebase.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod course;
mod players;

pub use course::{Course, CourseId, CourseParseError};
pub use players::{normalize_name, placeholder_name, Roster, RosterError};

/// Number of holes in a round.
pub const HOLES: usize = 18;
/// Index of the final hole.
pub const LAST_HOLE: usize = HOLES - 1;
pub const MAX_PLAYERS: usize = 6;
pub const MAX_NAME_LEN: usize = 20;

/// A recorded stroke count for a single hole. The largest value stands for "that many or more".
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(try_from = "u8", into = "u8")]
pub struct Strokes(u8);

impl Strokes {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 11;

    pub fn new(strokes: u8) -> Result<Self, StrokesError> {
        if (Self::MIN..=Self::MAX).contains(&strokes) {
            Ok(Self(strokes))
        } else {
            Err(StrokesError::OutOfRange(strokes))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Strokes {
    type Error = StrokesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strokes> for u8 {
    fn from(strokes: Strokes) -> u8 {
        strokes.0
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StrokesError {
    #[error("Strokes must be between 1 and 11, got {0}")]
    OutOfRange(u8),
}

/// A player in a round, with one slot per hole.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) scores: [Option<Strokes>; HOLES],
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: [None; HOLES],
        }
    }

    /// Build a player from already-validated scores.
    #[must_use]
    pub fn with_scores(name: impl Into<String>, scores: [Option<Strokes>; HOLES]) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scores(&self) -> &[Option<Strokes>; HOLES] {
        &self.scores
    }

    pub fn score(&self, hole: usize) -> Option<Strokes> {
        self.scores.get(hole).copied().flatten()
    }

    /// Sum of every scored hole. Unscored holes count as nothing.
    pub fn total(&self) -> u32 {
        self.scores
            .iter()
            .flatten()
            .map(|s| u32::from(s.get()))
            .sum()
    }

    pub fn holes_scored(&self) -> usize {
        self.scores.iter().flatten().count()
    }
}

/// The round in progress: course, players in turn order and the hole being played.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Round {
    pub(crate) course: CourseId,
    pub(crate) players: Vec<Player>,
    pub(crate) hole: usize,
}

impl Round {
    pub fn course(&self) -> CourseId {
        self.course
    }

    pub fn players(&self) -> &'_ [Player] {
        &self.players
    }

    /// The current hole, 0-based.
    pub fn hole(&self) -> usize {
        self.hole
    }

    pub fn par(&self) -> u8 {
        self.course.course().par(self.hole)
    }

    /// Whether every player has a score on the current hole.
    pub fn hole_complete(&self) -> bool {
        self.players.iter().all(|p| p.score(self.hole).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, Strokes, StrokesError, HOLES};

    #[test]
    pub fn test_strokes_range() {
        assert_eq!(Strokes::new(0).unwrap_err(), StrokesError::OutOfRange(0));
        assert_eq!(Strokes::new(1).unwrap().get(), 1);
        assert_eq!(Strokes::new(11).unwrap().get(), 11);
        assert_eq!(Strokes::new(12).unwrap_err(), StrokesError::OutOfRange(12));

        assert_eq!(serde_json::to_string(&Strokes::new(4).unwrap()).unwrap(), "4");
        assert!(serde_json::from_str::<Strokes>("15").is_err());
    }

    #[test]
    pub fn test_player_total_skips_unscored() {
        let mut scores = [None; HOLES];
        scores[0] = Some(Strokes::new(2).unwrap());
        scores[4] = Some(Strokes::new(11).unwrap());
        let p = Player::with_scores("Amy", scores);

        assert_eq!(p.total(), 13);
        assert_eq!(p.holes_scored(), 2);
        assert_eq!(p.score(1), None);
        assert_eq!(p.score(HOLES), None);
        assert_eq!(Player::new("Bo").total(), 0);
    }
}
