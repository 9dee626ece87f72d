//! Property-based tests for scoring and snapshots.

use std::convert::TryFrom;

use proptest::prelude::*;

use minigolf_core::persistence::{decode, encode, MemoryStore, Persistence, Snapshot};
use minigolf_core::scoring::{classify, rank, Outcome};
use minigolf_core::types::{CourseId, Player, Strokes, HOLES, MAX_PLAYERS};

fn scores_strategy() -> impl Strategy<Value = [Option<Strokes>; HOLES]> {
    prop::collection::vec(prop::option::of(1u8..=11), HOLES).prop_map(|v| {
        let mut scores = [None; HOLES];
        for (slot, s) in scores.iter_mut().zip(v) {
            *slot = s.map(|n| Strokes::new(n).unwrap());
        }
        scores
    })
}

fn player_strategy() -> impl Strategy<Value = Player> {
    ("[A-Za-z ]{0,20}", scores_strategy()).prop_map(|(name, scores)| Player::with_scores(name, scores))
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    (
        prop::sample::select(CourseId::ALL.to_vec()),
        0..HOLES,
        any::<bool>(),
        prop::collection::vec(player_strategy(), 1..=MAX_PLAYERS),
    )
        .prop_map(|(course, hole, started, players)| Snapshot {
            course,
            hole,
            started,
            players,
        })
}

proptest! {
    // A saved snapshot loads back unchanged.
    #[test]
    fn snapshot_round_trip(snapshot in snapshot_strategy()) {
        let encoded = encode(&snapshot).unwrap();
        prop_assert_eq!(decode(&encoded), Ok(snapshot.clone()));

        let mut p = Persistence::new(MemoryStore::new());
        p.save(&snapshot);
        prop_assert_eq!(p.load(), Some(snapshot));
    }

    // One stroke is a hole in one on every par.
    #[test]
    fn classify_single_stroke(par in 2u8..=4) {
        prop_assert_eq!(classify(Strokes::new(1).unwrap(), par), Outcome::HoleInOne);
    }

    // Classification agrees with the stroke/par difference.
    #[test]
    fn classify_matches_difference(strokes in 2u8..=11, par in 2u8..=4) {
        let diff = i32::from(strokes) - i32::from(par);
        let expected = match diff {
            d if d <= -2 => Outcome::Eagle,
            -1 => Outcome::Birdie,
            0 => Outcome::Par,
            1 => Outcome::Bogey,
            2 => Outcome::DoubleBogey,
            d => Outcome::OverPar(u8::try_from(d).unwrap()),
        };
        prop_assert_eq!(classify(Strokes::new(strokes).unwrap(), par), expected);
    }

    // Ranking is sorted by total and keeps turn order between equal totals.
    #[test]
    fn rank_is_sorted_and_stable(players in prop::collection::vec(player_strategy(), 1..=MAX_PLAYERS)) {
        let ranked = rank(&players);
        let index_of = |p: &Player| players.iter().position(|q| std::ptr::eq(q, p)).unwrap();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].total() <= pair[1].total());
            if pair[0].total() == pair[1].total() {
                prop_assert!(index_of(pair[0]) < index_of(pair[1]));
            }
        }
    }
}
