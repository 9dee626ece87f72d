//! Pure scoring helpers: per-hole classification, running differential against par, leaderboard
//! ordering and achievements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Rules;
use crate::types::{Course, Player, Round, Strokes, HOLES, LAST_HOLE};

/// How a single hole went, relative to par.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    HoleInOne,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    /// Three or more over par; carries the amount over.
    OverPar(u8),
}

impl Outcome {
    pub fn label(self) -> String {
        match self {
            Outcome::HoleInOne => "hole in one".to_string(),
            Outcome::Eagle => "eagle".to_string(),
            Outcome::Birdie => "birdie".to_string(),
            Outcome::Par => "par".to_string(),
            Outcome::Bogey => "bogey".to_string(),
            Outcome::DoubleBogey => "double bogey".to_string(),
            Outcome::OverPar(n) => format!("+{}", n),
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Outcome::HoleInOne => "hole-in-one",
            Outcome::Eagle => "eagle",
            Outcome::Birdie => "birdie",
            Outcome::Par => "par",
            Outcome::Bogey => "bogey",
            Outcome::DoubleBogey => "double-bogey",
            Outcome::OverPar(_) => "over-par",
        }
    }
}

/// Classify a hole. A single stroke is always a hole in one, even when it would also be an eagle.
pub fn classify(strokes: Strokes, par: u8) -> Outcome {
    if strokes.get() == 1 {
        return Outcome::HoleInOne;
    }
    match i32::from(strokes.get()) - i32::from(par) {
        d if d <= -2 => Outcome::Eagle,
        -1 => Outcome::Birdie,
        0 => Outcome::Par,
        1 => Outcome::Bogey,
        2 => Outcome::DoubleBogey,
        d => Outcome::OverPar(d as u8),
    }
}

/// Strokes minus par over the holes a player has actually scored. Displays as `E`, `+N` or `-N`.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct Differential(pub i32);

impl fmt::Display for Differential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("E"),
            d if d > 0 => write!(f, "+{}", d),
            d => write!(f, "{}", d),
        }
    }
}

/// Running differential over holes `0..=through`, skipping holes the player hasn't scored.
pub fn par_differential(player: &Player, course: &Course, through: usize) -> Differential {
    let through = through.min(LAST_HOLE);
    let (strokes, par) = player.scores()[..=through]
        .iter()
        .zip(course.pars.iter())
        .filter_map(|(s, par)| s.map(|s| (i32::from(s.get()), i32::from(*par))))
        .fold((0, 0), |(strokes, par), (s, p)| (strokes + s, par + p));
    Differential(strokes - par)
}

/// Players ordered by total strokes, lowest first. Players with equal totals keep their turn
/// order.
pub fn rank(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    // sort_by_key is stable
    ranked.sort_by_key(|p| p.total());
    ranked
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum Achievement {
    HoleInOne,
    Eagle,
    /// Sticking with a hole that took ten or more strokes.
    Persistence,
}

impl Achievement {
    pub fn label(self) -> &'static str {
        match self {
            Achievement::HoleInOne => "Hole in One",
            Achievement::Eagle => "Eagle",
            Achievement::Persistence => "Persistence",
        }
    }
}

/// An achievement earned on a particular (0-based) hole.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Award {
    pub achievement: Achievement,
    pub hole: usize,
}

/// Every achievement the player earned, in hole order. The same achievement on several holes is
/// reported once per hole.
pub fn achievements(player: &Player, course: &Course, rules: &Rules) -> Vec<Award> {
    let mut awards = vec![];
    for (hole, strokes) in player.scores().iter().enumerate() {
        let strokes = match strokes {
            Some(s) => s.get(),
            None => continue,
        };
        let diff = i32::from(strokes) - i32::from(course.par(hole));
        if strokes == 1 {
            awards.push(Award {
                achievement: Achievement::HoleInOne,
                hole,
            });
        }
        if diff <= -2 {
            awards.push(Award {
                achievement: Achievement::Eagle,
                hole,
            });
        }
        if rules.persistence_achievement && strokes >= 10 {
            awards.push(Award {
                achievement: Achievement::Persistence,
                hole,
            });
        }
    }
    awards
}

/// One row of the scorecard view.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ScorecardRow {
    pub name: String,
    pub holes: [Option<u8>; HOLES],
    pub front_nine: u32,
    pub back_nine: u32,
    pub total: u32,
    pub differential: Differential,
}

/// The full scorecard for a round, one row per player in turn order.
pub fn scorecard(round: &Round) -> Vec<ScorecardRow> {
    let course = round.course().course();
    round
        .players()
        .iter()
        .map(|p| {
            let mut holes = [None; HOLES];
            for (slot, s) in holes.iter_mut().zip(p.scores().iter()) {
                *slot = s.map(Strokes::get);
            }
            let nine = |range: std::ops::Range<usize>| -> u32 {
                holes[range].iter().flatten().map(|s| u32::from(*s)).sum()
            };
            ScorecardRow {
                name: p.name().to_string(),
                front_nine: nine(0..9),
                back_nine: nine(9..HOLES),
                total: p.total(),
                differential: par_differential(p, course, LAST_HOLE),
                holes,
            }
        })
        .collect()
}
