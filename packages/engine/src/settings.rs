//! Display settings slice.

use serde::{Deserialize, Serialize};

use crate::catalog::reciters::{self, DEFAULT_RECITER_ID};

pub const MIN_FONT_SIZE: u32 = 16;
pub const MAX_FONT_SIZE: u32 = 48;
pub const DEFAULT_FONT_SIZE: u32 = 24;

/// Reciter id retired as the default; stored selections migrate to the
/// current default on load.
const RETIRED_DEFAULT_RECITER: &str = "3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub font_size: u32,
    pub show_translation: bool,
    pub selected_reciter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: DEFAULT_FONT_SIZE,
            show_translation: true,
            selected_reciter: DEFAULT_RECITER_ID.to_string(),
        }
    }
}

impl Settings {
    pub fn clamp_font_size(size: u32) -> u32 {
        size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    /// Maps a persisted reciter id to the one to actually use: the
    /// retired default migrates forward, anything unknown falls back to
    /// the current default.
    pub fn migrate_reciter(stored: &str) -> String {
        if stored == RETIRED_DEFAULT_RECITER {
            return DEFAULT_RECITER_ID.to_string();
        }
        if reciters::reciter(stored).is_some() {
            stored.to_string()
        } else {
            DEFAULT_RECITER_ID.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reader_expectations() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert_eq!(settings.font_size, 24);
        assert!(settings.show_translation);
        assert_eq!(settings.selected_reciter, "7");
    }

    #[test]
    fn font_size_clamps_to_range() {
        assert_eq!(Settings::clamp_font_size(10), MIN_FONT_SIZE);
        assert_eq!(Settings::clamp_font_size(24), 24);
        assert_eq!(Settings::clamp_font_size(90), MAX_FONT_SIZE);
    }

    #[test]
    fn retired_reciter_migrates_to_default() {
        assert_eq!(Settings::migrate_reciter("3"), "7");
        assert_eq!(Settings::migrate_reciter("4"), "4");
        assert_eq!(Settings::migrate_reciter("nope"), "7");
    }
}
