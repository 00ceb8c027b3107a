//! Core state for Fair Play, the household card game.
//! Cards, stores, persistence and the session log live here; front ends
//! only compose them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use config::AppConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::card::{Card, CardId, CardStatus, HistoryAction};
pub use model::deck::Deck;
pub use model::locale::Locale;
pub use model::partner::PartnerId;
pub use repo::kv_repo::{
    KeyValueStorage, MemoryKeyValueStorage, RepoError, RepoResult, SqliteKeyValueStorage,
};
pub use repo::session_repo::{
    NewSession, SessionRecord, SessionRepository, SqliteSessionRepository,
};
pub use store::card_store::{CardStore, ResetOptions};
pub use store::game_store::{GameState, GameStore};
pub use store::settings_store::{LanguageSwitcher, SettingsState, SettingsStore};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
