//! # wird-engine - Quran reading & memorization core
//!
//! Pure domain logic for the Wird app, free of I/O so it can back any
//! shell (desktop, web, tests):
//!
//! - **Catalog** - static reference data: the 114-surah table, reciters
//!   and their audio sources, the gamification tables, memorization plans
//!   and azkar
//! - **Storage adapter** - scoped, namespaced key-value access with
//!   legacy fallback, snapshot export/apply and change notification
//! - **State container** - user progress, settings, navigation,
//!   bookmarks, memorization and azkar slices behind one mutation path
//!   with write-through persistence
//! - **Playback state machine** - explicit idle/playing/paused lifecycle
//!   over a pluggable audio sink
//!
//! ## Module structure
//!
//! - [`catalog`] - static reference data and lookups
//! - [`storage`] - `StorageBackend` trait, `MemoryBackend`, `ScopedStore`
//! - [`progress`] - `UserProgress`, activity timeline, level/title/streak rules
//! - [`settings`] - display settings slice
//! - [`store`] - `UserStore`, the application state container
//! - [`audio`] - `PlaybackState` machine and `AudioPlayer`
//! - [`memorize`] - memorization session state and quiz generation
//! - [`azkar`] - daily azkar progress slice
//! - [`search`] - Arabic search normalization
//! - [`types`] - shared domain types

pub mod audio;
pub mod azkar;
pub mod catalog;
pub mod memorize;
pub mod progress;
pub mod search;
pub mod settings;
pub mod storage;
pub mod store;
pub mod types;

pub use audio::{AudioPlayer, AudioSink, PlaybackState};
pub use progress::{ActivityEvent, ActivityKind, ReadingEntry, UserProgress};
pub use settings::Settings;
pub use storage::{MemoryBackend, ScopedStore, StorageBackend, StorageError};
pub use store::UserStore;
pub use types::{Bookmark, ReadingPosition, Verse};
