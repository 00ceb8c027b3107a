//! Versioned persistence envelope shared by all stores.
//!
//! # Responsibility
//! - Encode a store's persisted subset as `{"state": .., "version": n}`.
//! - Decode it on startup, routing older versions through an optional
//!   per-store migration function.
//!
//! # Invariants
//! - Loading never fails the caller: missing, unreadable or mismatched
//!   values yield `None` so the store falls back to its defaults.
//! - Writes are best-effort snapshots; failures are logged, not returned.

use crate::repo::kv_repo::{KeyValueStorage, RepoResult};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upgrades a raw persisted payload written at `from_version`.
///
/// Returning `None` discards the payload.
pub type MigrateFn<T> = fn(from_version: u32, state: Value) -> Option<T>;

/// Storage key, schema version and optional migration for one store.
pub struct PersistOptions<T> {
    pub key: &'static str,
    pub version: u32,
    pub migrate: Option<MigrateFn<T>>,
}

impl<T> PersistOptions<T> {
    pub const fn new(key: &'static str, version: u32) -> Self {
        Self {
            key,
            version,
            migrate: None,
        }
    }

    pub fn with_migration(mut self, migrate: MigrateFn<T>) -> Self {
        self.migrate = Some(migrate);
        self
    }
}

impl<T> Clone for PersistOptions<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            version: self.version,
            migrate: self.migrate,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct RawEnvelope {
    state: Value,
    #[serde(default)]
    version: u32,
}

/// Serializes `state` into the envelope format.
pub fn encode_state<T: Serialize>(state: &T, version: u32) -> RepoResult<String> {
    Ok(serde_json::to_string(&EnvelopeRef { state, version })?)
}

/// Decodes an envelope, applying `options.migrate` on version mismatch.
pub fn decode_state<T: DeserializeOwned>(raw: &str, options: &PersistOptions<T>) -> Option<T> {
    let envelope: RawEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(
                "event=persist_load module=persist status=discarded key={} reason=unreadable error={err}",
                options.key
            );
            return None;
        }
    };

    if envelope.version == options.version {
        return match serde_json::from_value(envelope.state) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(
                    "event=persist_load module=persist status=discarded key={} reason=invalid_state error={err}",
                    options.key
                );
                None
            }
        };
    }

    match options.migrate {
        Some(migrate) => {
            let migrated = migrate(envelope.version, envelope.state);
            debug!(
                "event=persist_migrate module=persist key={} from_version={} to_version={} migrated={}",
                options.key,
                envelope.version,
                options.version,
                migrated.is_some()
            );
            migrated
        }
        None => {
            warn!(
                "event=persist_load module=persist status=discarded key={} reason=version_mismatch found={} expected={}",
                options.key, envelope.version, options.version
            );
            None
        }
    }
}

/// Reads and decodes the persisted value for `options.key`.
pub fn load_state<T, S>(storage: &S, options: &PersistOptions<T>) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    match storage.get_item(options.key) {
        Ok(Some(raw)) => decode_state(&raw, options),
        Ok(None) => {
            debug!(
                "event=persist_load module=persist status=empty key={}",
                options.key
            );
            None
        }
        Err(err) => {
            error!(
                "event=persist_load module=persist status=error key={} error={err}",
                options.key
            );
            None
        }
    }
}

/// Writes `state` under `options.key`. Returns whether the write succeeded.
pub fn save_state<T, S>(storage: &S, options: &PersistOptions<T>, state: &T) -> bool
where
    T: Serialize,
    S: KeyValueStorage + ?Sized,
{
    let result = encode_state(state, options.version)
        .and_then(|encoded| storage.set_item(options.key, &encoded));
    match result {
        Ok(()) => true,
        Err(err) => {
            error!(
                "event=persist_save module=persist status=error key={} error={err}",
                options.key
            );
            false
        }
    }
}

/// Removes the persisted value for `options.key`.
pub fn clear_state<T, S>(storage: &S, options: &PersistOptions<T>) -> bool
where
    S: KeyValueStorage + ?Sized,
{
    match storage.remove_item(options.key) {
        Ok(()) => true,
        Err(err) => {
            error!(
                "event=persist_clear module=persist status=error key={} error={err}",
                options.key
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_state, encode_state, PersistOptions};
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    const OPTIONS: PersistOptions<Counter> = PersistOptions::new("test/counter", 2);

    fn migrate_counter(from_version: u32, state: Value) -> Option<Counter> {
        if from_version != 1 {
            return None;
        }
        let legacy = state.get("total")?.as_u64()?;
        Some(Counter {
            count: u32::try_from(legacy).ok()?,
        })
    }

    #[test]
    fn encodes_state_inside_versioned_envelope() {
        let encoded = encode_state(&Counter { count: 3 }, 2).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["state"]["count"], 3);
    }

    #[test]
    fn decodes_matching_version() {
        let decoded = decode_state(r#"{"state":{"count":7},"version":2}"#, &OPTIONS);
        assert_eq!(decoded, Some(Counter { count: 7 }));
    }

    #[test]
    fn discards_mismatched_version_without_migration() {
        assert_eq!(
            decode_state(r#"{"state":{"count":7},"version":1}"#, &OPTIONS),
            None
        );
    }

    #[test]
    fn runs_migration_for_older_version() {
        let options = PersistOptions::new("test/counter", 2).with_migration(migrate_counter);
        let decoded = decode_state(r#"{"state":{"total":9},"version":1}"#, &options);
        assert_eq!(decoded, Some(Counter { count: 9 }));

        let unknown = decode_state(r#"{"state":{"total":9},"version":0}"#, &options);
        assert_eq!(unknown, None);
    }

    #[test]
    fn discards_unreadable_payloads() {
        assert_eq!(decode_state("not json", &OPTIONS), None);
        assert_eq!(
            decode_state(r#"{"state":{"count":"x"},"version":2}"#, &OPTIONS),
            None
        );
    }
}
