//! Scoped key-value storage adapter.
//!
//! Persistence is best-effort: every backend failure degrades to "value
//! absent" on reads and "write ignored" on writes, logged at warn. The
//! adapter namespaces keys by profile scope (`wirdApp:<scope>:<key>`),
//! falls back to the unscoped legacy layout for guest reads, stamps a
//! last-updated key on every effective change and notifies an optional
//! listener with the raw key that changed.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STORAGE_NAMESPACE: &str = "wirdApp";
pub const GUEST_SCOPE_ID: &str = "guest";
pub const SNAPSHOT_UPDATED_AT_KEY: &str = "wirdLastStateSyncAt";

/// Version written into the envelope of JSON document keys.
pub const SCHEMA_VERSION: u32 = 1;

/// Well-known raw keys. Everything the app persists lives under one of
/// these, which is also the set a scope-migration snapshot covers.
pub mod keys {
    pub const USER_PROGRESS: &str = "wirdUserProgress";
    pub const DARK_MODE: &str = "wirdDarkMode";
    pub const FONT_SIZE: &str = "wirdFontSize";
    pub const SHOW_TRANSLATION: &str = "wirdShowTranslation";
    pub const SELECTED_RECITER: &str = "wirdSelectedReciter";
    pub const BOOKMARKS: &str = "wirdBookmarks";
    pub const CURRENT_SURAH: &str = "wirdCurrentSurah";
    pub const CURRENT_PAGE: &str = "wirdCurrentPage";
    pub const READING_POSITION: &str = "wirdLastReadingPosition";
    pub const AZKAR_PROGRESS: &str = "wirdAzkarProgress";
    pub const AZKAR_ACTIVE_TAB: &str = "wirdAzkarActiveTab";
    pub const MEMORIZE_STATE: &str = "wirdMemorizeState";
    /// Per-surah verse cache written by the content client.
    pub const SURAH_CACHE_PREFIX: &str = "wirdSurahCache:";
}

/// Keys included in a scope-migration snapshot.
pub const USER_STORAGE_KEYS: [&str; 13] = [
    keys::USER_PROGRESS,
    keys::DARK_MODE,
    keys::FONT_SIZE,
    keys::SHOW_TRANSLATION,
    keys::SELECTED_RECITER,
    keys::BOOKMARKS,
    keys::CURRENT_SURAH,
    keys::CURRENT_PAGE,
    keys::READING_POSITION,
    keys::AZKAR_PROGRESS,
    keys::AZKAR_ACTIVE_TAB,
    keys::MEMORIZE_STATE,
    SNAPSHOT_UPDATED_AT_KEY,
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Raw fallible key-value access. Implementations do no namespacing;
/// [`ScopedStore`] layers scoping and failure tolerance on top.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw (already scoped or legacy) key, bypassing the adapter.
    pub fn seed(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Envelope wrapped around JSON document keys so future shape changes
/// migrate deterministically.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    schema_version: u32,
    data: T,
}

type ChangeListener = Box<dyn Fn(&str) + Send>;

/// Scoped, namespaced view over a [`StorageBackend`].
pub struct ScopedStore<B> {
    backend: B,
    scope: String,
    listener: Option<ChangeListener>,
}

impl<B: StorageBackend> ScopedStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_scope(backend, GUEST_SCOPE_ID)
    }

    pub fn with_scope(backend: B, scope: &str) -> Self {
        Self {
            backend,
            scope: normalize_scope(scope),
            listener: None,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Switches the active scope. Empty or whitespace input selects the
    /// guest scope.
    pub fn set_scope(&mut self, scope: &str) {
        self.scope = normalize_scope(scope);
    }

    /// Registers the change listener. At most one listener is kept; it
    /// receives the raw (unscoped) key on every effective change.
    pub fn on_change(&mut self, listener: impl Fn(&str) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn scoped_key(&self, raw_key: &str) -> String {
        format!("{STORAGE_NAMESPACE}:{}:{raw_key}", self.scope)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "storage read failed");
                None
            }
        }
    }

    fn write_raw(&mut self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value) {
            tracing::warn!(key, error = %err, "storage write ignored");
        }
    }

    fn remove_raw(&mut self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            tracing::warn!(key, error = %err, "storage remove ignored");
        }
    }

    fn stamp_updated_at(&mut self) {
        let stamp = chrono::Utc::now().to_rfc3339();
        let key = self.scoped_key(SNAPSHOT_UPDATED_AT_KEY);
        self.write_raw(&key, &stamp);
    }

    fn emit_change(&self, raw_key: &str) {
        if let Some(ref listener) = self.listener {
            listener(raw_key);
        }
    }

    /// Scoped read; guest scope falls back to the unscoped legacy value.
    pub fn get(&self, raw_key: &str) -> Option<String> {
        if let Some(value) = self.read_raw(&self.scoped_key(raw_key)) {
            return Some(value);
        }
        if self.scope == GUEST_SCOPE_ID {
            return self.read_raw(raw_key);
        }
        None
    }

    pub fn set(&mut self, raw_key: &str, value: &str) {
        let scoped = self.scoped_key(raw_key);
        let previous = self.read_raw(&scoped);

        self.write_raw(&scoped, value);
        if raw_key != SNAPSHOT_UPDATED_AT_KEY {
            self.stamp_updated_at();
        }

        if previous.as_deref() != Some(value) {
            self.emit_change(raw_key);
        }
    }

    pub fn remove(&mut self, raw_key: &str) {
        let scoped = self.scoped_key(raw_key);
        let existed = self.read_raw(&scoped).is_some();

        self.remove_raw(&scoped);
        if existed && raw_key != SNAPSHOT_UPDATED_AT_KEY {
            self.stamp_updated_at();
        }
        if existed {
            self.emit_change(raw_key);
        }
    }

    /// Reads a JSON document key. Accepts both the versioned envelope
    /// and a bare legacy payload; anything else is treated as absent.
    pub fn get_document<T: DeserializeOwned>(&self, raw_key: &str) -> Option<T> {
        let raw = self.get(raw_key)?;
        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) => {
                if envelope.schema_version > SCHEMA_VERSION {
                    tracing::warn!(
                        key = raw_key,
                        version = envelope.schema_version,
                        "document written by a newer schema"
                    );
                }
                Some(envelope.data)
            }
            Err(_) => serde_json::from_str::<T>(&raw).ok(),
        }
    }

    /// Writes a JSON document key inside the versioned envelope.
    pub fn set_document<T: Serialize>(&mut self, raw_key: &str, value: &T) {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            data: value,
        };
        match serde_json::to_string(&envelope) {
            Ok(serialized) => self.set(raw_key, &serialized),
            Err(err) => {
                tracing::warn!(key = raw_key, error = %err, "document serialization failed");
            }
        }
    }

    /// Bulk read of the given raw keys under the active scope (with the
    /// usual guest legacy fallback). Absent keys are omitted.
    pub fn export_snapshot(&self, raw_keys: &[&str]) -> BTreeMap<String, String> {
        let mut snapshot = BTreeMap::new();
        for &key in raw_keys {
            if let Some(value) = self.get(key) {
                snapshot.insert(key.to_string(), value);
            }
        }
        snapshot
    }

    /// Bulk write into the active scope, used when migrating data
    /// between scopes. Change notifications fire only for keys whose
    /// value actually changed, and only when `emit_changes` is set.
    pub fn apply_snapshot(&mut self, snapshot: &BTreeMap<String, String>, emit_changes: bool) {
        for (key, value) in snapshot {
            let scoped = self.scoped_key(key);
            let previous = self.read_raw(&scoped);
            self.write_raw(&scoped, value);
            if emit_changes && previous.as_deref() != Some(value.as_str()) {
                self.emit_change(key);
            }
        }
    }
}

fn normalize_scope(scope: &str) -> String {
    let trimmed = scope.trim();
    if trimmed.is_empty() {
        GUEST_SCOPE_ID.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Backend whose writes always fail, for the degrade-to-no-op path.
    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("disabled".into()))
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = ScopedStore::new(MemoryBackend::new());
        store.set(keys::FONT_SIZE, "24");
        assert_eq!(store.get(keys::FONT_SIZE), Some("24".to_string()));
    }

    #[test]
    fn keys_are_scope_namespaced() {
        let mut store = ScopedStore::new(MemoryBackend::new());
        store.set(keys::FONT_SIZE, "24");
        assert_eq!(
            store.backend().get("wirdApp:guest:wirdFontSize").unwrap(),
            Some("24".to_string())
        );
    }

    #[test]
    fn guest_scope_falls_back_to_legacy_layout() {
        let mut backend = MemoryBackend::new();
        backend.seed(keys::FONT_SIZE, "32");
        let store = ScopedStore::new(backend);
        assert_eq!(store.get(keys::FONT_SIZE), Some("32".to_string()));
    }

    #[test]
    fn named_scope_ignores_legacy_layout() {
        let mut backend = MemoryBackend::new();
        backend.seed(keys::FONT_SIZE, "32");
        let store = ScopedStore::with_scope(backend, "profile-1");
        assert_eq!(store.get(keys::FONT_SIZE), None);
    }

    #[test]
    fn blank_scope_normalizes_to_guest() {
        let store = ScopedStore::with_scope(MemoryBackend::new(), "   ");
        assert_eq!(store.scope(), GUEST_SCOPE_ID);
    }

    #[test]
    fn set_stamps_updated_at() {
        let mut store = ScopedStore::new(MemoryBackend::new());
        store.set(keys::DARK_MODE, "true");
        assert!(store.get(SNAPSHOT_UPDATED_AT_KEY).is_some());
    }

    #[test]
    fn listener_fires_only_on_value_change() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let mut store = ScopedStore::new(MemoryBackend::new());
        store.on_change(move |_key| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set(keys::DARK_MODE, "true");
        store.set(keys::DARK_MODE, "true");
        store.set(keys::DARK_MODE, "false");
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn remove_of_missing_key_is_silent() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let mut store = ScopedStore::new(MemoryBackend::new());
        store.on_change(move |_key| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.remove(keys::BOOKMARKS);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        store.set(keys::BOOKMARKS, "[]");
        store.remove(keys::BOOKMARKS);
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(store.get(keys::BOOKMARKS), None);
    }

    #[test]
    fn broken_backend_never_panics() {
        let mut store = ScopedStore::new(BrokenBackend);
        store.set(keys::FONT_SIZE, "24");
        store.remove(keys::FONT_SIZE);
        assert_eq!(store.get(keys::FONT_SIZE), None);
    }

    #[test]
    fn documents_round_trip_through_envelope() {
        let mut store = ScopedStore::new(MemoryBackend::new());
        store.set_document(keys::BOOKMARKS, &vec![1u16, 2, 3]);

        let raw = store.get(keys::BOOKMARKS).unwrap();
        assert!(raw.contains("schemaVersion"));
        assert_eq!(
            store.get_document::<Vec<u16>>(keys::BOOKMARKS),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn bare_legacy_document_still_decodes() {
        let mut store = ScopedStore::new(MemoryBackend::new());
        store.set(keys::BOOKMARKS, "[4,5]");
        assert_eq!(
            store.get_document::<Vec<u16>>(keys::BOOKMARKS),
            Some(vec![4, 5])
        );
    }

    #[test]
    fn corrupt_document_reads_as_absent() {
        let mut store = ScopedStore::new(MemoryBackend::new());
        store.set(keys::BOOKMARKS, "{not json");
        assert_eq!(store.get_document::<Vec<u16>>(keys::BOOKMARKS), None);
    }

    #[test]
    fn snapshot_export_apply_moves_data_between_scopes() {
        let mut guest = ScopedStore::new(MemoryBackend::new());
        guest.set(keys::FONT_SIZE, "28");
        guest.set(keys::SELECTED_RECITER, "4");

        let snapshot = guest.export_snapshot(&USER_STORAGE_KEYS);
        assert!(snapshot.contains_key(keys::FONT_SIZE));

        let mut profile = ScopedStore::with_scope(MemoryBackend::new(), "profile-1");
        profile.apply_snapshot(&snapshot, false);
        assert_eq!(profile.get(keys::FONT_SIZE), Some("28".to_string()));
        assert_eq!(profile.get(keys::SELECTED_RECITER), Some("4".to_string()));
    }
}
