use fairplay_core::repo::session_repo::SessionId;
use fairplay_core::store::game_store::GAME_STORE_KEY;
use fairplay_core::{
    open_db_in_memory, GameState, GameStore, KeyValueStorage, MemoryKeyValueStorage, NewSession,
    RepoError, RepoResult, SessionRecord, SessionRepository, SqliteSessionRepository,
};
use serde_json::Value;
use std::cell::RefCell;

#[test]
fn increments_update_level_and_streak() {
    let storage = MemoryKeyValueStorage::new();
    let mut game = GameStore::new(&storage);

    game.increment_score_by_one();
    game.increment_score(98);
    assert_eq!(
        game.state(),
        GameState {
            level: 1,
            score: 99,
            streak: 2
        }
    );

    game.increment_score(1);
    assert_eq!(game.state().level, 2);
    game.increment_score(150);
    assert_eq!(game.state().level, 3);
    assert_eq!(game.state().streak, 4);
}

#[test]
fn reset_returns_to_initial_counters() {
    let storage = MemoryKeyValueStorage::new();
    let mut game = GameStore::new(&storage);
    game.increment_score(420);

    game.reset();

    assert_eq!(game.state(), GameState::default());
    assert_eq!(
        (game.state().level, game.state().score, game.state().streak),
        (1, 0, 0)
    );
}

#[test]
fn state_persists_under_game_key() {
    let storage = MemoryKeyValueStorage::new();
    let mut game = GameStore::new(&storage);
    game.increment_score(230);

    let raw = storage.get_item(GAME_STORE_KEY).unwrap().unwrap();
    let envelope: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(envelope["version"], 1);
    assert_eq!(envelope["state"]["score"], 230);
    assert_eq!(envelope["state"]["level"], 3);

    let reloaded = GameStore::new(&storage);
    assert_eq!(reloaded.state(), game.state());
}

#[test]
fn finish_session_records_positive_scores_then_resets() {
    let conn = open_db_in_memory().unwrap();
    let sessions = SqliteSessionRepository::try_new(&conn).unwrap();
    let storage = MemoryKeyValueStorage::new();
    let mut game = GameStore::new(&storage);

    assert_eq!(game.finish_session(&sessions), None);

    game.increment_score(120);
    let id = game.finish_session(&sessions).unwrap();
    assert_eq!(game.state(), GameState::default());

    let recent = sessions.load_recent_sessions(None).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, id);
    assert_eq!((recent[0].score, recent[0].level), (120, 2));
}

struct FailingSessions {
    attempts: RefCell<u32>,
}

impl SessionRepository for FailingSessions {
    fn log_session(&self, _session: &NewSession) -> RepoResult<SessionId> {
        *self.attempts.borrow_mut() += 1;
        Err(RepoError::InvalidData("session sink offline".to_string()))
    }

    fn load_recent_sessions(&self, _limit: Option<u32>) -> RepoResult<Vec<SessionRecord>> {
        Ok(Vec::new())
    }
}

#[test]
fn finish_session_failure_is_swallowed_and_still_resets() {
    let storage = MemoryKeyValueStorage::new();
    let mut game = GameStore::new(&storage);
    let sessions = FailingSessions {
        attempts: RefCell::new(0),
    };
    game.increment_score(10);

    assert_eq!(game.finish_session(&sessions), None);
    assert_eq!(*sessions.attempts.borrow(), 1);
    assert_eq!(game.state(), GameState::default());
}

#[test]
fn subscribers_receive_new_game_state() {
    let storage = MemoryKeyValueStorage::new();
    let mut game = GameStore::new(&storage);
    let seen = std::rc::Rc::new(RefCell::new(Vec::new()));
    {
        let seen = std::rc::Rc::clone(&seen);
        game.subscribe(move |state: &GameState| seen.borrow_mut().push(state.score));
    }

    game.increment_score(5);
    game.reset();

    assert_eq!(*seen.borrow(), vec![5, 0]);
}
