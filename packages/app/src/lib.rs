//! Application layer for the Wird Quran app.
//!
//! Wires the pure engine to the outside world: a SQLite-backed storage
//! backend, the Quran content API client, platform audio and the
//! composition root a shell embeds. No UI lives here.

pub mod app;
pub mod config;
pub mod content;
pub mod logging;
pub mod platform;
pub mod storage;

pub use app::App;
pub use config::AppConfig;
pub use content::{ApiError, ContentClient};
pub use storage::SqliteBackend;
