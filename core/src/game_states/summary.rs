use serde::{Deserialize, Serialize};

use crate::config::Rules;
use crate::game_states::setup::Setup;
use crate::scoring::{achievements, par_differential, rank, Award, Differential};
use crate::types::{CourseId, Player, Round, LAST_HOLE};

/// A player's line on the final leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Standing {
    /// 1-based. Players with the same total share a position.
    pub position: usize,
    pub name: String,
    pub total: u32,
    pub differential: Differential,
    pub awards: Vec<Award>,
}

/// The finished round. The leaderboard is computed once when the round ends and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Summary {
    course: CourseId,
    players: Vec<Player>,
    leaderboard: Vec<Standing>,
}

impl Summary {
    pub(crate) fn new(round: &Round, rules: &Rules) -> Self {
        let course = round.course.course();
        let mut leaderboard: Vec<Standing> = Vec::with_capacity(round.players.len());
        for p in rank(&round.players) {
            let total = p.total();
            let position = match leaderboard.last() {
                Some(prev) if prev.total == total => prev.position,
                _ => leaderboard.len() + 1,
            };
            leaderboard.push(Standing {
                position,
                name: p.name().to_string(),
                total,
                differential: par_differential(p, course, LAST_HOLE),
                awards: achievements(p, course, rules),
            });
        }

        Self {
            course: round.course,
            players: round.players.clone(),
            leaderboard,
        }
    }

    pub fn course(&self) -> CourseId {
        self.course
    }

    /// Players in turn order.
    pub fn players(&self) -> &'_ [Player] {
        &self.players
    }

    /// Players in finishing order.
    pub fn leaderboard(&self) -> &'_ [Standing] {
        &self.leaderboard
    }

    pub fn winners(&self) -> impl Iterator<Item = &'_ Standing> {
        self.leaderboard.iter().filter(|s| s.position == 1)
    }

    #[must_use]
    pub fn new_round(&self) -> Setup {
        Setup::new()
    }
}
