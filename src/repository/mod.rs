use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::{DashMap, Entry};
use nanoid::nanoid;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::logic::Game;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no game found with id {0}")]
pub struct GameNotFound(pub String);

/// A stored game plus the bookkeeping the host needs: the mutex serializes
/// concurrent requests against the same game, the timestamp feeds the idle
/// sweeper.
#[derive(Debug)]
pub struct StoredGame {
    pub game: Game,
    last_activity: Instant,
}

impl StoredGame {
    fn new(game: Game) -> Self {
        Self {
            game,
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn is_idle(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

pub type SharedGame = Arc<Mutex<StoredGame>>;
pub type SharedRepository = Arc<GameRepository>;

/// In-memory store of all running games, keyed by opaque generated ids.
/// The engine knows nothing about these ids.
#[derive(Debug, Default)]
pub struct GameRepository {
    games: DashMap<String, SharedGame>,
}

impl GameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the game and returns its freshly assigned id. Ids start short
    /// and grow once a length keeps colliding.
    pub fn store(&self, game: Game) -> String {
        let stored: SharedGame = Arc::new(Mutex::new(StoredGame::new(game)));

        let mut id_length = 5;
        let max_attempts_per_length = 10;

        loop {
            for _ in 0..max_attempts_per_length {
                let id = nanoid!(id_length);
                match self.games.entry(id.clone()) {
                    Entry::Occupied(_) => continue,
                    Entry::Vacant(entry) => {
                        entry.insert(Arc::clone(&stored));
                        return id;
                    }
                }
            }

            id_length += 1;
        }
    }

    pub fn get(&self, id: &str) -> Result<SharedGame, GameNotFound> {
        self.games
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| GameNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.games.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Removes every game idle for longer than `timeout`, skipping games
    /// currently locked by a request. Returns the removed ids.
    pub fn sweep_idle(&self, timeout: Duration) -> Vec<String> {
        let mut idle_ids = Vec::new();
        for entry in self.games.iter() {
            if let Ok(stored) = entry.value().try_lock()
                && stored.is_idle(timeout)
            {
                idle_ids.push(entry.key().clone());
            }
        }

        for id in &idle_ids {
            self.games.remove(id);
        }

        idle_ids
    }
}
