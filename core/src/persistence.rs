//! Best-effort snapshots of the round in an external key/value store, so a round in progress
//! survives a reload.
//!
//! Nothing here ever fails loudly. Write errors are logged and dropped, and anything unreadable on
//! load is treated as "no saved round" (and removed, if it was there but malformed).

use std::collections::HashMap;
use std::convert::TryFrom;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{CourseId, Player, Round, Strokes, HOLES, LAST_HOLE, MAX_PLAYERS};

pub const DEFAULT_KEY: &str = "minigolf.round";

/// A string-keyed store of string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// What gets written to the store. Totals are never stored; they are derived from the scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub course: CourseId,
    pub hole: usize,
    pub started: bool,
    pub players: Vec<Player>,
}

impl Snapshot {
    pub fn of_round(round: &Round) -> Self {
        Self {
            course: round.course,
            hole: round.hole,
            started: true,
            players: round.players.clone(),
        }
    }

    pub fn into_round(self) -> Round {
        Round {
            course: self.course,
            players: self.players,
            hole: self.hole,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord<'a> {
    course: CourseId,
    hole: usize,
    players: Vec<PlayerRecord<'a>>,
    game_started: bool,
}

#[derive(Serialize)]
struct PlayerRecord<'a> {
    name: &'a str,
    scores: &'a [Option<Strokes>],
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Parse(String),
    #[error("Snapshot is not an object")]
    NotAnObject,
    #[error("Snapshot names an unknown course")]
    UnknownCourse,
    #[error("Snapshot hole index is out of range")]
    HoleOutOfRange,
    #[error("Snapshot players are malformed")]
    MalformedPlayers,
    #[error("Snapshot has no players")]
    NoPlayers,
    #[error("Snapshot has too many players")]
    TooManyPlayers,
}

pub fn encode(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    let record = SnapshotRecord {
        course: snapshot.course,
        hole: snapshot.hole,
        players: snapshot
            .players
            .iter()
            .map(|p| PlayerRecord {
                name: p.name(),
                scores: p.scores(),
            })
            .collect(),
        game_started: snapshot.started,
    };
    serde_json::to_string(&record)
}

/// Parse and validate a stored snapshot. Course, hole and player shape must all be valid; an
/// individual score that isn't a stroke count in range is dropped to unscored.
pub fn decode(raw: &str) -> Result<Snapshot, SnapshotError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| SnapshotError::Parse(e.to_string()))?;
    let obj = value.as_object().ok_or(SnapshotError::NotAnObject)?;

    let course = obj
        .get("course")
        .and_then(Value::as_str)
        .and_then(|c| c.parse::<CourseId>().ok())
        .ok_or(SnapshotError::UnknownCourse)?;
    let hole = obj
        .get("hole")
        .and_then(Value::as_u64)
        .and_then(|h| usize::try_from(h).ok())
        .filter(|h| *h <= LAST_HOLE)
        .ok_or(SnapshotError::HoleOutOfRange)?;
    let players = obj
        .get("players")
        .and_then(Value::as_array)
        .ok_or(SnapshotError::MalformedPlayers)?;
    if players.is_empty() {
        return Err(SnapshotError::NoPlayers);
    }
    if players.len() > MAX_PLAYERS {
        return Err(SnapshotError::TooManyPlayers);
    }
    let players = players
        .iter()
        .map(decode_player)
        .collect::<Result<Vec<_>, _>>()?;
    let started = obj
        .get("gameStarted")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(Snapshot {
        course,
        hole,
        started,
        players,
    })
}

fn decode_player(value: &Value) -> Result<Player, SnapshotError> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or(SnapshotError::MalformedPlayers)?;
    let raw_scores = value
        .get("scores")
        .and_then(Value::as_array)
        .filter(|s| s.len() == HOLES)
        .ok_or(SnapshotError::MalformedPlayers)?;

    let mut scores = [None; HOLES];
    for (slot, raw) in scores.iter_mut().zip(raw_scores) {
        *slot = raw
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(|n| Strokes::new(n).ok());
    }
    Ok(Player::with_scores(name, scores))
}

/// Reads and writes the snapshot under a single fixed key.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn save(&mut self, snapshot: &Snapshot) {
        let encoded = match encode(snapshot) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode round snapshot");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, encoded) {
            warn!(error = %e, key = %self.key, "failed to save round snapshot");
        }
    }

    /// The saved snapshot, if there is a valid one.
    pub fn load(&mut self) -> Option<Snapshot> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, key = %self.key, "failed to read round snapshot");
                return None;
            }
        };
        match decode(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(error = %e, "discarding saved round snapshot");
                self.clear();
                None
            }
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(error = %e, key = %self.key, "failed to clear round snapshot");
        }
    }
}
