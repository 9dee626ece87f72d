use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Rules;
use crate::game_states::setup::Setup;
use crate::game_states::summary::Summary;
use crate::scoring::{classify, Outcome};
use crate::types::{Round, Strokes, StrokesError, LAST_HOLE};

/// In the playing phase, each player records a stroke count for the current hole. The round only
/// moves on once every player has a score on the hole; moving back never touches scores.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Playing {
    round: Round,
}

impl Playing {
    /// `round.hole` must already be a valid hole index.
    pub(crate) fn new(round: Round) -> Self {
        debug_assert!(round.hole <= LAST_HOLE);
        Self { round }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn hole(&self) -> usize {
        self.round.hole
    }

    /// Record `strokes` for `player` on the current hole, replacing any earlier entry. Does not
    /// move to the next hole.
    pub fn record_score(
        &self,
        player: usize,
        strokes: u8,
    ) -> Result<(Playing, Outcome), PlayingError> {
        let strokes = Strokes::new(strokes)?;
        let mut round = self.round.clone();
        let hole = round.hole;
        let p = round
            .players
            .get_mut(player)
            .ok_or(PlayingError::PlayerDoesntExist)?;
        p.scores[hole] = Some(strokes);

        let outcome = classify(strokes, round.par());
        Ok((Self { round }, outcome))
    }

    /// Move to the next hole, or finish the round after the last one.
    pub fn advance(&self, rules: &Rules) -> Result<AdvanceResult, PlayingError> {
        if !self.round.hole_complete() {
            return Err(PlayingError::IncompleteHole);
        }
        if self.round.hole < LAST_HOLE {
            let mut round = self.round.clone();
            round.hole += 1;
            Ok(AdvanceResult::NextHole(Self { round }))
        } else {
            Ok(AdvanceResult::Finished(Summary::new(&self.round, rules)))
        }
    }

    /// Step back one hole. From the first hole this leaves the round, keeping the names around.
    pub fn retreat(&self) -> RetreatResult {
        if self.round.hole > 0 {
            let mut round = self.round.clone();
            round.hole -= 1;
            RetreatResult::PreviousHole(Self { round })
        } else {
            RetreatResult::BackToSetup(Setup::prefilled(
                self.round.course,
                self.round
                    .players
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect(),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceResult {
    NextHole(Playing),
    Finished(Summary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetreatResult {
    PreviousHole(Playing),
    BackToSetup(Setup),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlayingError {
    #[error("That player doesn't exist")]
    PlayerDoesntExist,
    #[error("{0}")]
    InvalidStrokes(#[from] StrokesError),
    #[error("Enter scores for all players")]
    IncompleteHole,
}

#[cfg(test)]
mod tests {
    use super::{AdvanceResult, Playing, PlayingError, RetreatResult};
    use crate::config::Rules;
    use crate::game_states::setup::Setup;
    use crate::scoring::Outcome;
    use crate::types::{CourseId, StrokesError};

    fn two_players() -> Playing {
        Setup::new()
            .select_course(CourseId::Dragon)
            .start_round(vec!["Amy".to_string(), "Bo".to_string()])
            .unwrap()
    }

    fn next(playing: &Playing) -> Playing {
        match playing.advance(&Rules::default()).unwrap() {
            AdvanceResult::NextHole(p) => p,
            AdvanceResult::Finished(_) => panic!("round finished early"),
        }
    }

    #[test]
    pub fn test_record_score() {
        let p = two_players();
        let (p, outcome) = p.record_score(0, 1).unwrap();
        assert_eq!(outcome, Outcome::HoleInOne);
        let (p, outcome) = p.record_score(1, 4).unwrap();
        assert_eq!(outcome, Outcome::DoubleBogey);

        assert_eq!(p.hole(), 0);
        assert_eq!(p.round().players()[0].total(), 1);
        assert_eq!(p.round().players()[1].total(), 4);

        // Re-entering a score replaces it.
        let (p, _) = p.record_score(1, 3).unwrap();
        assert_eq!(p.round().players()[1].total(), 3);
    }

    #[test]
    pub fn test_record_score_rejects_bad_input() {
        let p = two_players();
        assert_eq!(
            p.record_score(2, 3).unwrap_err(),
            PlayingError::PlayerDoesntExist
        );
        assert_eq!(
            p.record_score(0, 0).unwrap_err(),
            PlayingError::InvalidStrokes(StrokesError::OutOfRange(0))
        );
        assert_eq!(
            p.record_score(0, 12).unwrap_err(),
            PlayingError::InvalidStrokes(StrokesError::OutOfRange(12))
        );
    }

    #[test]
    pub fn test_advance_requires_every_score() {
        let p = two_players();
        assert_eq!(
            p.advance(&Rules::default()).unwrap_err(),
            PlayingError::IncompleteHole
        );
        let (p, _) = p.record_score(0, 2).unwrap();
        assert_eq!(
            p.advance(&Rules::default()).unwrap_err(),
            PlayingError::IncompleteHole
        );
        let (p, _) = p.record_score(1, 3).unwrap();
        assert_eq!(next(&p).hole(), 1);
    }

    #[test]
    pub fn test_retreat_keeps_scores() {
        let (p, _) = two_players().record_score(0, 2).unwrap();
        let (p, _) = p.record_score(1, 3).unwrap();
        let p = next(&p);
        let (p, _) = p.record_score(0, 5).unwrap();

        let back = match p.retreat() {
            RetreatResult::PreviousHole(back) => back,
            RetreatResult::BackToSetup(_) => panic!("expected to stay in the round"),
        };
        assert_eq!(back.hole(), 0);
        assert_eq!(back.round().players()[0].score(0).unwrap().get(), 2);
        assert_eq!(back.round().players()[0].score(1).unwrap().get(), 5);
    }

    #[test]
    pub fn test_retreat_from_first_hole_returns_to_setup() {
        let p = two_players();
        match p.retreat() {
            RetreatResult::BackToSetup(setup) => {
                assert_eq!(setup.course(), CourseId::Dragon);
                assert_eq!(setup.roster().names(), &["Amy".to_string(), "Bo".to_string()]);
            }
            RetreatResult::PreviousHole(_) => panic!("expected to leave the round"),
        }
    }

    #[test]
    pub fn test_advance_past_last_hole_finishes() {
        let mut p = two_players();
        for hole in 0..18 {
            assert_eq!(p.hole(), hole);
            let (scored, _) = p.record_score(0, 3).unwrap();
            let (scored, _) = scored.record_score(1, 2).unwrap();
            match scored.advance(&Rules::default()).unwrap() {
                AdvanceResult::NextHole(n) => p = n,
                AdvanceResult::Finished(summary) => {
                    assert_eq!(hole, 17);
                    assert_eq!(summary.leaderboard()[0].name, "Bo");
                    return;
                }
            }
        }
        panic!("round never finished");
    }
}
