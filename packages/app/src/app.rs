//! Composition root: the state container, content client and audio
//! player wired over one durable store.

use std::time::Instant;

use wird_engine::catalog;
use wird_engine::storage::{keys, ScopedStore, USER_STORAGE_KEYS};
use wird_engine::{AudioPlayer, UserStore, Verse};

use crate::config::AppConfig;
use crate::content::{ApiError, ContentClient};
use crate::platform::audio::NullSink;
use crate::storage::{SqliteBackend, StoreResult};

pub struct App {
    started_at: Instant,
    user: UserStore<SqliteBackend>,
    content: ContentClient,
    audio: AudioPlayer<NullSink>,
}

impl App {
    /// Opens (or creates) the durable store under the configured data
    /// directory and loads every state slice.
    pub fn new(config: &AppConfig) -> StoreResult<Self> {
        let backend = SqliteBackend::open(config.db_path())?;
        Ok(Self::with_backend(backend, config))
    }

    pub fn with_backend(backend: SqliteBackend, config: &AppConfig) -> Self {
        Self {
            started_at: Instant::now(),
            user: UserStore::new(ScopedStore::new(backend)),
            content: ContentClient::new(config.api_base_url.clone()),
            audio: AudioPlayer::new(NullSink::new()),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn user(&self) -> &UserStore<SqliteBackend> {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserStore<SqliteBackend> {
        &mut self.user
    }

    pub fn audio(&self) -> &AudioPlayer<NullSink> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioPlayer<NullSink> {
        &mut self.audio
    }

    // ---- content ---------------------------------------------------

    /// Verses of a surah: in-memory cache, then the durable per-surah
    /// cache, then the network. Fetched chapters are persisted so the
    /// reader works offline afterwards.
    pub async fn surah_verses(&mut self, surah: u16) -> Result<Vec<Verse>, ApiError> {
        if let Some(cached) = self.content.cached_surah(surah) {
            return Ok(cached.clone());
        }

        let cache_key = format!("{}{surah}", keys::SURAH_CACHE_PREFIX);
        if let Some(stored) = self.user.storage().get(&cache_key) {
            if let Ok(verses) = serde_json::from_str::<Vec<Verse>>(&stored) {
                if !verses.is_empty() {
                    self.content.prime_surah(surah, verses.clone());
                    return Ok(verses);
                }
            }
        }

        let verses = self.content.surah_verses(surah).await?;
        match serde_json::to_string(&verses) {
            Ok(serialized) => self.user.storage_mut().set(&cache_key, &serialized),
            Err(err) => tracing::warn!(surah, error = %err, "surah cache write skipped"),
        }
        Ok(verses)
    }

    /// Surah numbers a hizb spans, for the catalog's hizb filter.
    pub async fn hizb_surah_numbers(&mut self, hizb: u8) -> Result<Vec<u16>, ApiError> {
        self.content.hizb_surahs(hizb).await
    }

    // ---- audio -----------------------------------------------------

    /// Plays a full-surah recitation by the selected reciter.
    pub fn play_surah_audio(&mut self, surah: u16) {
        let reciter = &self.user.settings().selected_reciter;
        let url = catalog::surah_audio_url(reciter, surah);
        self.audio.play(&url);
    }

    pub fn pause_audio(&mut self) {
        self.audio.pause();
    }

    pub fn stop_audio(&mut self) {
        self.audio.stop();
    }

    // ---- profile scopes --------------------------------------------

    /// Switches the storage scope, carrying the current scope's data
    /// into the target when the target has none yet (the guest ->
    /// signed-in migration hook), then reloads every slice.
    pub fn switch_scope(&mut self, scope: &str) {
        let snapshot = self.user.storage().export_snapshot(&USER_STORAGE_KEYS);

        let store = self.user.storage_mut();
        store.set_scope(scope);
        if store.export_snapshot(&USER_STORAGE_KEYS).is_empty() {
            store.apply_snapshot(&snapshot, false);
        }

        self.user.reload();
    }
}
