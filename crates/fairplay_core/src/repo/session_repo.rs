//! Session log contract and SQLite implementation.
//!
//! # Responsibility
//! - Record finished game sessions (`score`, `level`) and return their id.
//! - List recent sessions, newest first.
//!
//! # Invariants
//! - Session rows are append-only.
//! - Recent listing is ordered by `created_at DESC, id DESC`.

use crate::repo::kv_repo::{ensure_schema_ready, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

pub const SESSIONS_DEFAULT_LIMIT: u32 = 10;
pub const SESSIONS_LIMIT_MAX: u32 = 100;

pub type SessionId = i64;

/// Input for one session log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub score: u32,
    pub level: u32,
    pub notes: Option<String>,
}

/// Stored session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub score: u32,
    pub level: u32,
    pub notes: Option<String>,
}

/// Session log sink.
pub trait SessionRepository {
    fn log_session(&self, session: &NewSession) -> RepoResult<SessionId>;
    fn load_recent_sessions(&self, limit: Option<u32>) -> RepoResult<Vec<SessionRecord>>;
}

pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn log_session(&self, session: &NewSession) -> RepoResult<SessionId> {
        self.conn.execute(
            "INSERT INTO sessions (created_at, score, level, notes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                Utc::now().timestamp_millis(),
                session.score,
                session.level,
                session.notes.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn load_recent_sessions(&self, limit: Option<u32>) -> RepoResult<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, score, level, notes
             FROM sessions
             ORDER BY created_at DESC, id DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([normalize_session_limit(limit)])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(parse_session_row(row)?);
        }
        Ok(sessions)
    }
}

/// Clamps a caller-provided list limit.
pub fn normalize_session_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => SESSIONS_DEFAULT_LIMIT,
        Some(value) => value.min(SESSIONS_LIMIT_MAX),
    }
}

fn parse_session_row(row: &Row<'_>) -> RepoResult<SessionRecord> {
    let id: SessionId = row.get("id")?;
    let created_ms: i64 = row.get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_ms).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "sessions.created_at `{created_ms}` out of range for row {id}"
        ))
    })?;
    Ok(SessionRecord {
        id,
        created_at,
        score: row.get("score")?,
        level: row.get("level")?,
        notes: row.get("notes")?,
    })
}
