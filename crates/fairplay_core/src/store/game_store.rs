//! Game score store.
//!
//! # Responsibility
//! - Track `score`, derived `level` and `streak` for the current session.
//! - Hand finished sessions to a `SessionRepository`.
//!
//! # Invariants
//! - `level == max(1, score / 100 + 1)` after every increment.
//! - `reset` always lands on `(level 1, score 0, streak 0)`.

use crate::repo::kv_repo::KeyValueStorage;
use crate::repo::session_repo::{NewSession, SessionId, SessionRepository};
use crate::store::observe::{ListenerId, Listeners};
use crate::store::persist::{load_state, save_state, PersistOptions};
use log::{error, info};
use serde::{Deserialize, Serialize};

pub const GAME_STORE_KEY: &str = "fair-play/game-store";
pub const GAME_STORE_VERSION: u32 = 1;
pub const DEFAULT_SCORE_INCREMENT: u32 = 1;
pub const POINTS_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub level: u32,
    pub score: u32,
    pub streak: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            streak: 0,
        }
    }
}

pub fn level_for_score(score: u32) -> u32 {
    (score / POINTS_PER_LEVEL + 1).max(1)
}

pub struct GameStore<S: KeyValueStorage> {
    storage: S,
    persist: PersistOptions<GameState>,
    state: GameState,
    listeners: Listeners<GameState>,
}

impl<S: KeyValueStorage> GameStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(
            storage,
            PersistOptions::new(GAME_STORE_KEY, GAME_STORE_VERSION),
        )
    }

    pub fn with_options(storage: S, persist: PersistOptions<GameState>) -> Self {
        let state = load_state(&storage, &persist).unwrap_or_default();
        Self {
            storage,
            persist,
            state,
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn increment_score(&mut self, value: u32) {
        let score = self.state.score.saturating_add(value);
        self.state = GameState {
            level: level_for_score(score),
            score,
            streak: self.state.streak.saturating_add(1),
        };
        info!(
            "event=game_score module=game_store status=ok added={value} score={} level={} streak={}",
            self.state.score, self.state.level, self.state.streak
        );
        self.commit();
    }

    pub fn increment_score_by_one(&mut self) {
        self.increment_score(DEFAULT_SCORE_INCREMENT);
    }

    pub fn reset(&mut self) {
        self.state = GameState::default();
        info!("event=game_reset module=game_store status=ok");
        self.commit();
    }

    /// Records the current score through `sessions` when it is positive, then
    /// resets. A failed write is logged and the reset still happens.
    ///
    /// Returns the id of the recorded session.
    pub fn finish_session<R>(&mut self, sessions: &R) -> Option<SessionId>
    where
        R: SessionRepository + ?Sized,
    {
        let mut recorded = None;
        if self.state.score > 0 {
            let session = NewSession {
                score: self.state.score,
                level: self.state.level,
                notes: None,
            };
            match sessions.log_session(&session) {
                Ok(id) => {
                    info!(
                        "event=game_finish module=game_store status=ok session_id={id} score={} level={}",
                        session.score, session.level
                    );
                    recorded = Some(id);
                }
                Err(err) => {
                    error!("event=game_finish module=game_store status=error error={err}");
                }
            }
        }
        self.reset();
        recorded
    }

    pub fn subscribe(&mut self, listener: impl Fn(&GameState) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn commit(&self) {
        save_state(&self.storage, &self.persist, &self.state);
        self.listeners.notify(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::level_for_score;

    #[test]
    fn level_steps_every_hundred_points() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(99), 1);
        assert_eq!(level_for_score(100), 2);
        assert_eq!(level_for_score(250), 3);
    }
}
