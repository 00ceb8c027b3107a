//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value medium stores persist to and the session log sink.
//! - Isolate SQLite details from store logic.
//!
//! # Invariants
//! - SQLite-backed implementations only accept migrated connections.

pub mod kv_repo;
pub mod session_repo;
