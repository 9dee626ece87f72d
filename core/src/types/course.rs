use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HOLES;

/// Identifies one of the fixed courses. Serialized as the lowercase id, which is also the section
/// name used by the narrative file.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CourseId {
    Dragon,
    Wizard,
}

impl CourseId {
    pub const ALL: [CourseId; 2] = [CourseId::Dragon, CourseId::Wizard];

    pub fn as_str(self) -> &'static str {
        match self {
            CourseId::Dragon => "dragon",
            CourseId::Wizard => "wizard",
        }
    }

    pub fn course(self) -> &'static Course {
        match self {
            CourseId::Dragon => &DRAGON,
            CourseId::Wizard => &WIZARD,
        }
    }
}

impl Default for CourseId {
    fn default() -> Self {
        CourseId::Dragon
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseId {
    type Err = CourseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CourseId::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CourseParseError::UnknownCourse(s.to_string()))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CourseParseError {
    #[error("Unknown course {0:?}")]
    UnknownCourse(String),
}

/// Static course data. Every par is at least 1.
#[derive(Debug, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub name: &'static str,
    pub pars: [u8; HOLES],
}

impl Course {
    /// Par of the hole at `hole` (0-based).
    pub fn par(&self, hole: usize) -> u8 {
        self.pars[hole]
    }

    pub fn total_par(&self) -> u32 {
        self.pars.iter().map(|p| u32::from(*p)).sum()
    }
}

static DRAGON: Course = Course {
    id: CourseId::Dragon,
    name: "Dragon's Lair",
    pars: [2, 3, 3, 2, 4, 3, 3, 2, 4, 3, 2, 3, 4, 3, 2, 3, 4, 3],
};

static WIZARD: Course = Course {
    id: CourseId::Wizard,
    name: "Wizard's Tower",
    pars: [3, 2, 3, 4, 2, 3, 3, 4, 2, 3, 3, 2, 4, 3, 2, 4, 3, 3],
};
