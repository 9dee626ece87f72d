//! The single owner of the current `GameState`. Every user intent comes through here: the phase
//! computes the next state, the new state replaces the old one, and then the snapshot in storage
//! is brought in line. A rejected intent changes nothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Rules;
use crate::game_states::{
    AdvanceResult, GameState, Playing, PlayingError, RetreatResult, Setup, SetupError,
};
use crate::persistence::{KeyValueStore, Persistence, Snapshot};
use crate::scoring::Outcome;
use crate::types::CourseId;

/// Everything the presentation layer can ask for.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Intent {
    SelectCourse(CourseId),
    AddPlayer,
    RemovePlayer(usize),
    RenamePlayer(usize, String),
    StartRound(Vec<String>),
    RecordScore { player: usize, strokes: u8 },
    Advance,
    Retreat,
    /// A back navigation from outside the app, e.g. the browser's back button.
    NavigateBack,
    /// Only sent once the user has confirmed.
    Quit,
    NewRound,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("Can't do that while in {0}")]
    WrongPhase(&'static str),
    #[error("The course can't be changed once the round has started")]
    RoundAlreadyStarted,
    #[error("{0}")]
    Setup(#[from] SetupError),
    #[error("{0}")]
    Playing(#[from] PlayingError),
}

pub struct Game<S> {
    state: GameState,
    rules: Rules,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> Game<S> {
    /// A fresh game in `Setup`. Anything already in the store is left alone until the first
    /// save or clear.
    pub fn new(persistence: Persistence<S>, rules: Rules) -> Self {
        Self {
            state: GameState::default(),
            rules,
            persistence,
        }
    }

    /// Pick up where a previous session left off, if the store holds a valid snapshot.
    pub fn resume(mut persistence: Persistence<S>, rules: Rules) -> Self {
        let state = match persistence.load() {
            Some(snapshot) if snapshot.started => {
                info!(
                    course = %snapshot.course,
                    hole = snapshot.hole,
                    players = snapshot.players.len(),
                    "resuming saved round"
                );
                GameState::Playing(Playing::new(snapshot.into_round()))
            }
            Some(snapshot) => GameState::Setup(Setup::prefilled(
                snapshot.course,
                snapshot
                    .players
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect(),
            )),
            None => GameState::default(),
        };
        Self {
            state,
            rules,
            persistence,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), GameError> {
        match intent {
            Intent::SelectCourse(course) => self.select_course(course),
            Intent::AddPlayer => self.add_player().map(|_| ()),
            Intent::RemovePlayer(index) => self.remove_player(index),
            Intent::RenamePlayer(index, name) => self.rename_player(index, name),
            Intent::StartRound(names) => self.start_round(names),
            Intent::RecordScore { player, strokes } => {
                self.record_score(player, strokes).map(|_| ())
            }
            Intent::Advance => self.advance(),
            Intent::Retreat | Intent::NavigateBack => self.retreat(),
            Intent::Quit => self.quit(),
            Intent::NewRound => self.new_round(),
        }
    }

    fn pre_round(&self) -> Result<&Setup, GameError> {
        self.state
            .setup()
            .ok_or_else(|| GameError::WrongPhase(self.state.name()))
    }

    fn playing(&self) -> Result<&Playing, GameError> {
        self.state
            .playing()
            .ok_or_else(|| GameError::WrongPhase(self.state.name()))
    }

    /// Replace the setup while keeping the `Setup`/`Paused` distinction.
    fn replace_setup(&mut self, setup: Setup) {
        self.state = match self.state {
            GameState::Paused(_) => GameState::Paused(setup),
            _ => GameState::Setup(setup),
        };
    }

    fn transition(&mut self, next: GameState) {
        debug!(from = self.state.name(), to = next.name(), "game state transition");
        self.state = next;
    }

    pub fn select_course(&mut self, course: CourseId) -> Result<(), GameError> {
        if self.state.started() {
            return Err(GameError::RoundAlreadyStarted);
        }
        let setup = self.pre_round()?.select_course(course);
        self.replace_setup(setup);
        Ok(())
    }

    /// Add a blank roster slot, returning its index.
    pub fn add_player(&mut self) -> Result<usize, GameError> {
        let (setup, index) = self.pre_round()?.add_player()?;
        self.replace_setup(setup);
        Ok(index)
    }

    pub fn remove_player(&mut self, index: usize) -> Result<(), GameError> {
        let setup = self.pre_round()?.remove_player(index)?;
        self.replace_setup(setup);
        Ok(())
    }

    pub fn rename_player(&mut self, index: usize, name: String) -> Result<(), GameError> {
        let setup = self.pre_round()?.set_name(index, name)?;
        self.replace_setup(setup);
        Ok(())
    }

    pub fn start_round(&mut self, names: Vec<String>) -> Result<(), GameError> {
        let playing = self.pre_round()?.start_round(names)?;
        self.transition(GameState::Playing(playing));
        self.save_round();
        Ok(())
    }

    /// Record a score on the current hole and report how it went.
    pub fn record_score(&mut self, player: usize, strokes: u8) -> Result<Outcome, GameError> {
        let (playing, outcome) = self.playing()?.record_score(player, strokes)?;
        self.state = GameState::Playing(playing);
        self.save_round();
        Ok(outcome)
    }

    pub fn advance(&mut self) -> Result<(), GameError> {
        let result = self.playing()?.advance(&self.rules)?;
        match result {
            AdvanceResult::NextHole(playing) => {
                self.transition(GameState::Playing(playing));
                self.save_round();
            }
            AdvanceResult::Finished(summary) => {
                self.transition(GameState::Summary(summary));
                self.persistence.clear();
            }
        }
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), GameError> {
        let result = self.playing()?.retreat();
        match result {
            RetreatResult::PreviousHole(playing) => {
                self.transition(GameState::Playing(playing));
                self.save_round();
            }
            RetreatResult::BackToSetup(setup) => {
                self.transition(GameState::Paused(setup));
                self.persistence.clear();
            }
        }
        Ok(())
    }

    /// Abandon whatever is in progress. The caller is responsible for asking the user first.
    pub fn quit(&mut self) -> Result<(), GameError> {
        if let GameState::Setup(_) = self.state {
            return Err(GameError::WrongPhase(self.state.name()));
        }
        self.transition(GameState::Setup(Setup::new()));
        self.persistence.clear();
        Ok(())
    }

    pub fn new_round(&mut self) -> Result<(), GameError> {
        let setup = match &self.state {
            GameState::Summary(summary) => summary.new_round(),
            _ => return Err(GameError::WrongPhase(self.state.name())),
        };
        self.transition(GameState::Setup(setup));
        self.persistence.clear();
        Ok(())
    }

    fn save_round(&mut self) {
        if let GameState::Playing(playing) = &self.state {
            self.persistence.save(&Snapshot::of_round(playing.round()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameError, Intent};
    use crate::config::Rules;
    use crate::game_states::{GameState, PlayingError, SetupError};
    use crate::persistence::{KeyValueStore, MemoryStore, Persistence, StoreError, DEFAULT_KEY};
    use crate::types::{CourseId, RosterError};

    fn game() -> Game<MemoryStore> {
        Game::new(Persistence::new(MemoryStore::new()), Rules::default())
    }

    fn saved(game: &Game<MemoryStore>) -> Option<String> {
        game.persistence().store().get(DEFAULT_KEY).unwrap()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    pub fn test_setup_intents() {
        let mut g = game();
        g.dispatch(Intent::SelectCourse(CourseId::Wizard)).unwrap();
        assert_eq!(g.add_player().unwrap(), 1);
        g.dispatch(Intent::RenamePlayer(1, "Bo".to_string())).unwrap();
        g.dispatch(Intent::RemovePlayer(0)).unwrap();
        assert_eq!(
            g.dispatch(Intent::RemovePlayer(0)),
            Err(GameError::Setup(SetupError::Roster(RosterError::LastPlayer)))
        );

        let setup = g.state().setup().unwrap();
        assert_eq!(setup.course(), CourseId::Wizard);
        assert_eq!(setup.roster().names(), &["Bo".to_string()]);
    }

    #[test]
    pub fn test_player_cap() {
        let mut g = game();
        for _ in 0..5 {
            g.dispatch(Intent::AddPlayer).unwrap();
        }
        let err = g.dispatch(Intent::AddPlayer).unwrap_err();
        assert_eq!(err.to_string(), "Maximum 6 players allowed");
    }

    #[test]
    pub fn test_wrong_phase_is_rejected() {
        let mut g = game();
        assert_eq!(
            g.dispatch(Intent::RecordScore {
                player: 0,
                strokes: 3
            }),
            Err(GameError::WrongPhase("setup"))
        );
        assert_eq!(g.advance(), Err(GameError::WrongPhase("setup")));
        assert_eq!(g.retreat(), Err(GameError::WrongPhase("setup")));
        assert_eq!(g.quit(), Err(GameError::WrongPhase("setup")));
        assert_eq!(g.new_round(), Err(GameError::WrongPhase("setup")));

        g.start_round(names(&["Amy"])).unwrap();
        assert_eq!(
            g.select_course(CourseId::Wizard),
            Err(GameError::RoundAlreadyStarted)
        );
        assert_eq!(g.add_player(), Err(GameError::WrongPhase("playing")));
        assert_eq!(g.state().playing().unwrap().round().course(), CourseId::Dragon);
    }

    #[test]
    pub fn test_start_round_requires_players() {
        let mut g = game();
        let err = g.start_round(vec![]).unwrap_err();
        assert_eq!(err.to_string(), "At least one player required");
        assert_eq!(g.state(), &GameState::default());
        assert_eq!(saved(&g), None);
    }

    #[test]
    pub fn test_scores_are_saved_after_each_change() {
        let mut g = game();
        g.start_round(names(&["Amy", "Bo"])).unwrap();
        assert!(saved(&g).is_some());

        g.record_score(0, 2).unwrap();
        let resumed = Game::resume(
            Persistence::new(g.persistence().store().clone()),
            Rules::default(),
        );
        assert_eq!(resumed.state(), g.state());

        assert_eq!(
            g.record_score(0, 12),
            Err(GameError::Playing(PlayingError::InvalidStrokes(
                crate::types::StrokesError::OutOfRange(12)
            )))
        );
        assert_eq!(
            g.state().playing().unwrap().round().players()[0]
                .score(0)
                .unwrap()
                .get(),
            2
        );
    }

    #[test]
    pub fn test_navigate_back_matches_retreat() {
        let mut g = game();
        g.start_round(names(&["Amy"])).unwrap();
        g.record_score(0, 2).unwrap();
        g.advance().unwrap();

        g.dispatch(Intent::NavigateBack).unwrap();
        assert_eq!(g.state().playing().unwrap().hole(), 0);

        g.dispatch(Intent::NavigateBack).unwrap();
        match g.state() {
            GameState::Paused(setup) => {
                assert_eq!(setup.roster().names(), &["Amy".to_string()])
            }
            other => panic!("expected paused, got {:?}", other),
        }
        assert_eq!(saved(&g), None);

        // A paused game can be set up again or dropped entirely.
        g.select_course(CourseId::Wizard).unwrap();
        assert!(matches!(g.state(), GameState::Paused(_)));
        g.quit().unwrap();
        assert_eq!(g.state(), &GameState::default());
    }

    #[test]
    pub fn test_quit_clears_everything() {
        let mut g = game();
        g.start_round(names(&["Amy", "Bo"])).unwrap();
        g.record_score(1, 4).unwrap();
        g.dispatch(Intent::Quit).unwrap();

        assert_eq!(g.state(), &GameState::default());
        assert_eq!(saved(&g), None);
    }

    #[test]
    pub fn test_resume_unstarted_snapshot_prefills_setup() {
        let mut store = MemoryStore::new();
        let raw = serde_json::json!({
            "course": "wizard",
            "hole": 0,
            "players": [{"name": "Amy", "scores": vec![serde_json::Value::Null; 18]}],
            "gameStarted": false,
        });
        store.set(DEFAULT_KEY, raw.to_string()).unwrap();

        let g = Game::resume(Persistence::new(store), Rules::default());
        let setup = g.state().setup().unwrap();
        assert_eq!(setup.course(), CourseId::Wizard);
        assert_eq!(setup.roster().names(), &["Amy".to_string()]);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("quota".to_string()))
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota".to_string()))
        }
    }

    #[test]
    pub fn test_storage_failures_never_block_play() {
        let mut g = Game::resume(Persistence::new(BrokenStore), Rules::default());
        assert_eq!(g.state(), &GameState::default());

        g.start_round(names(&["Amy"])).unwrap();
        g.record_score(0, 3).unwrap();
        g.advance().unwrap();
        assert_eq!(g.state().playing().unwrap().hole(), 1);
        g.quit().unwrap();
    }
}
