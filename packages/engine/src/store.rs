//! The application state container.
//!
//! `UserStore` is the single source of truth for user progress,
//! settings, navigation, bookmarks, memorization and azkar state. Every
//! slice loads from the scoped store on construction (defaults on
//! absent or corrupt data) and is written back immediately after each
//! mutation, so the persisted view never trails the in-memory one.
//!
//! The container is plain owned state behind `&mut self`; shells and
//! tests construct as many independent instances as they need.

use chrono::{DateTime, NaiveDate, Utc};

use crate::azkar::{AzkarProgress, AzkarState, ZikrAdvance, ZIKR_COMPLETION_POINTS};
use crate::catalog::azkar::ZikrCategory;
use crate::catalog::{self, gamification, SURAH_COUNT};
use crate::memorize::{MemorizeOutcome, MemorizeState, TestQuestion};
use crate::progress::{advance_streak, ActivityEvent, ReadingEntry, UserProgress};
use crate::settings::Settings;
use crate::storage::{keys, ScopedStore, StorageBackend};
use crate::types::{Bookmark, ReadingPosition};

/// One-time bonus for memorizing every verse of a surah, on top of the
/// per-verse award.
pub const SURAH_COMPLETION_BONUS: u32 = 100;

pub struct UserStore<B: StorageBackend> {
    store: ScopedStore<B>,
    progress: UserProgress,
    settings: Settings,
    current_surah: u16,
    current_page: u32,
    reading_position: Option<ReadingPosition>,
    bookmarks: Vec<Bookmark>,
    memorize: MemorizeState,
    azkar: AzkarState,
}

impl<B: StorageBackend> UserStore<B> {
    pub fn new(store: ScopedStore<B>) -> Self {
        let mut container = Self {
            store,
            progress: UserProgress::default(),
            settings: Settings::default(),
            current_surah: 1,
            current_page: 1,
            reading_position: None,
            bookmarks: Vec::new(),
            memorize: MemorizeState::default(),
            azkar: AzkarState::default(),
        };
        container.reload();
        container
    }

    pub fn from_backend(backend: B) -> Self {
        Self::new(ScopedStore::new(backend))
    }

    /// Re-reads every slice from the scoped store, e.g. after a scope
    /// switch. Absent or corrupt values fall back to defaults.
    pub fn reload(&mut self) {
        self.progress = self
            .store
            .get_document::<UserProgress>(keys::USER_PROGRESS)
            .map(UserProgress::normalize)
            .unwrap_or_default();

        self.settings = Settings {
            dark_mode: self.load_json_scalar(keys::DARK_MODE, false),
            font_size: Settings::clamp_font_size(
                self.load_json_scalar(keys::FONT_SIZE, crate::settings::DEFAULT_FONT_SIZE),
            ),
            show_translation: self.load_json_scalar(keys::SHOW_TRANSLATION, true),
            selected_reciter: self
                .store
                .get(keys::SELECTED_RECITER)
                .map(|raw| Settings::migrate_reciter(&raw))
                .unwrap_or_else(|| Settings::default().selected_reciter),
        };

        self.current_surah = self
            .store
            .get(keys::CURRENT_SURAH)
            .and_then(|raw| raw.trim().parse::<u16>().ok())
            .filter(|n| (1..=SURAH_COUNT).contains(n))
            .unwrap_or(1);
        self.current_page = self
            .store
            .get(keys::CURRENT_PAGE)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(1);
        self.reading_position = self.store.get_document(keys::READING_POSITION);

        self.bookmarks = self
            .store
            .get_document::<Vec<Bookmark>>(keys::BOOKMARKS)
            .unwrap_or_default();
        dedup_bookmarks(&mut self.bookmarks);

        self.memorize = self
            .store
            .get_document::<MemorizeState>(keys::MEMORIZE_STATE)
            .unwrap_or_default();

        self.azkar = AzkarState {
            progress: self
                .store
                .get_document::<AzkarProgress>(keys::AZKAR_PROGRESS)
                .unwrap_or_default(),
            active_tab: self
                .store
                .get(keys::AZKAR_ACTIVE_TAB)
                .and_then(|raw| ZikrCategory::parse(&raw))
                .unwrap_or_default(),
        };
    }

    fn load_json_scalar<T: serde::de::DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.store
            .get(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(fallback)
    }

    // ---- accessors -------------------------------------------------

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn memorize(&self) -> &MemorizeState {
        &self.memorize
    }

    pub fn azkar(&self) -> &AzkarState {
        &self.azkar
    }

    pub fn current_surah(&self) -> u16 {
        self.current_surah
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn reading_position(&self) -> Option<ReadingPosition> {
        self.reading_position
    }

    pub fn storage(&self) -> &ScopedStore<B> {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut ScopedStore<B> {
        &mut self.store
    }

    // ---- progress --------------------------------------------------

    /// Every progress change goes through here so the persisted
    /// document always reflects the latest state.
    fn update_progress(&mut self, mutate: impl FnOnce(&mut UserProgress)) {
        mutate(&mut self.progress);
        self.store.set_document(keys::USER_PROGRESS, &self.progress);
    }

    pub fn add_points(&mut self, points: u32) {
        self.update_progress(|p| p.add_points(points));
    }

    /// Marks a challenge completed, awarding its table points once.
    /// Returns false when it was already completed.
    pub fn complete_challenge(&mut self, challenge_id: u32) -> bool {
        if self.progress.completed_challenges.contains(&challenge_id) {
            return false;
        }
        let points = gamification::challenge(challenge_id)
            .map(|c| c.points)
            .unwrap_or(0);
        self.update_progress(|p| {
            p.add_points(points);
            p.completed_challenges.push(challenge_id);
            p.push_activity(ActivityEvent::Challenge {
                date: Utc::now(),
                challenge_id,
            });
        });
        true
    }

    /// Same idempotent pattern as [`Self::complete_challenge`].
    pub fn unlock_achievement(&mut self, achievement_id: u32) -> bool {
        if self.progress.unlocked_achievements.contains(&achievement_id) {
            return false;
        }
        let points = gamification::achievement(achievement_id)
            .map(|a| a.points)
            .unwrap_or(0);
        self.update_progress(|p| {
            p.add_points(points);
            p.unlocked_achievements.push(achievement_id);
            p.push_activity(ActivityEvent::Achievement {
                date: Utc::now(),
                achievement_id,
            });
        });
        true
    }

    /// Marks a surah memorized, awarding its verse count in points.
    /// Returns false when it was already memorized.
    pub fn add_to_memorized(&mut self, surah: u16) -> bool {
        if self.progress.memorized_surahs.contains(&surah) {
            return false;
        }
        let points = catalog::surah(surah).map(|s| u32::from(s.verses)).unwrap_or(0);
        self.update_progress(|p| {
            p.add_points(points);
            p.memorized_surahs.push(surah);
            p.push_activity(ActivityEvent::Memorization {
                date: Utc::now(),
                surah,
            });
        });
        true
    }

    pub fn add_to_favorites(&mut self, surah: u16) -> bool {
        if self.progress.favorite_surahs.contains(&surah) {
            return false;
        }
        self.update_progress(|p| {
            p.favorite_surahs.push(surah);
            p.push_activity(ActivityEvent::Favorite {
                date: Utc::now(),
                surah,
            });
        });
        true
    }

    pub fn remove_from_favorites(&mut self, surah: u16) {
        if !self.progress.favorite_surahs.contains(&surah) {
            return;
        }
        self.update_progress(|p| {
            p.favorite_surahs.retain(|s| *s != surah);
        });
    }

    /// Advances the reading streak for today (UTC). Safe to call
    /// repeatedly: same-day calls are no-ops.
    pub fn update_streak(&mut self) {
        self.update_streak_on(Utc::now().date_naive());
    }

    fn update_streak_on(&mut self, today: NaiveDate) {
        let Some(advance) = advance_streak(&self.progress.last_read, today, self.progress.streak)
        else {
            return;
        };
        self.update_progress(|p| {
            p.streak = advance.streak;
            p.last_read = today.format("%Y-%m-%d").to_string();
            if advance.bonus_points > 0 {
                p.add_points(advance.bonus_points);
            }
        });
    }

    /// Records a reading session: verse totals, bounded history, a
    /// timeline event and the streak update.
    pub fn add_reading_history(&mut self, surah: u16, verses: u16) {
        self.add_reading_history_at(surah, verses, Utc::now());
    }

    fn add_reading_history_at(&mut self, surah: u16, verses: u16, now: DateTime<Utc>) {
        self.update_progress(|p| {
            p.total_read += u32::from(verses);
            p.push_reading_entry(ReadingEntry {
                date: now,
                surah,
                verses,
            });
            p.push_activity(ActivityEvent::Reading {
                date: now,
                surah,
                verses,
            });
        });
        self.update_streak_on(now.date_naive());
    }

    // ---- bookmarks -------------------------------------------------

    /// Adds a bookmark unless one already exists for (surah, verse).
    pub fn add_bookmark(&mut self, surah: u16, verse: u16, note: Option<String>) -> bool {
        if self
            .bookmarks
            .iter()
            .any(|b| b.surah == surah && b.verse == verse)
        {
            return false;
        }
        self.bookmarks.push(Bookmark { surah, verse, note });
        self.store.set_document(keys::BOOKMARKS, &self.bookmarks);
        self.update_progress(|p| {
            p.push_activity(ActivityEvent::Bookmark {
                date: Utc::now(),
                surah,
                verse,
            });
        });
        true
    }

    /// Removes by key match; removing a missing pair is a no-op.
    pub fn remove_bookmark(&mut self, surah: u16, verse: u16) {
        let before = self.bookmarks.len();
        self.bookmarks
            .retain(|b| !(b.surah == surah && b.verse == verse));
        if self.bookmarks.len() != before {
            self.store.set_document(keys::BOOKMARKS, &self.bookmarks);
        }
    }

    // ---- settings --------------------------------------------------

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.dark_mode = !self.settings.dark_mode;
        let value = if self.settings.dark_mode { "true" } else { "false" };
        self.store.set(keys::DARK_MODE, value);
        self.settings.dark_mode
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.settings.font_size = Settings::clamp_font_size(size);
        let serialized = self.settings.font_size.to_string();
        self.store.set(keys::FONT_SIZE, &serialized);
    }

    pub fn toggle_translation(&mut self) -> bool {
        self.settings.show_translation = !self.settings.show_translation;
        let value = if self.settings.show_translation {
            "true"
        } else {
            "false"
        };
        self.store.set(keys::SHOW_TRANSLATION, value);
        self.settings.show_translation
    }

    pub fn set_reciter(&mut self, reciter_id: &str) {
        self.settings.selected_reciter = reciter_id.to_string();
        self.store.set(keys::SELECTED_RECITER, reciter_id);
    }

    // ---- navigation ------------------------------------------------

    pub fn set_current_surah(&mut self, surah: u16) {
        self.current_surah = surah.clamp(1, SURAH_COUNT);
        let serialized = self.current_surah.to_string();
        self.store.set(keys::CURRENT_SURAH, &serialized);
    }

    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
        let serialized = self.current_page.to_string();
        self.store.set(keys::CURRENT_PAGE, &serialized);
    }

    pub fn save_reading_position(&mut self, surah: u16, verse: u16) {
        let position = ReadingPosition { surah, verse };
        self.reading_position = Some(position);
        self.store.set_document(keys::READING_POSITION, &position);
    }

    // ---- memorization ----------------------------------------------

    fn persist_memorize(&mut self) {
        self.store.set_document(keys::MEMORIZE_STATE, &self.memorize);
    }

    /// Records a memorized verse. Completing the surah's last verse
    /// marks the whole surah memorized (verse-count points) and awards
    /// the completion bonus, both exactly once.
    pub fn mark_verse_memorized(&mut self, surah: u16, verse: u16) -> MemorizeOutcome {
        let total = catalog::surah(surah).map(|s| s.verses).unwrap_or(0);
        if !self.memorize.record_verse(surah, verse) {
            return MemorizeOutcome::AlreadyRecorded;
        }
        self.persist_memorize();

        if self.memorize.is_surah_complete(surah, total) {
            if self.add_to_memorized(surah) {
                self.add_points(SURAH_COMPLETION_BONUS);
            }
            MemorizeOutcome::SurahCompleted
        } else {
            MemorizeOutcome::Recorded {
                remaining: self.memorize.remaining_verses(surah, total),
            }
        }
    }

    pub fn set_memorize_surah(&mut self, surah: u16) {
        self.memorize.selected_surah = surah.clamp(1, SURAH_COUNT);
        self.memorize.current_verse = 1;
        self.persist_memorize();
    }

    pub fn set_memorize_verse(&mut self, verse: u16) {
        self.memorize.current_verse = verse.max(1);
        self.persist_memorize();
    }

    pub fn select_memorize_plan(&mut self, plan_id: Option<&str>) {
        self.memorize.selected_plan = plan_id.map(str::to_string);
        self.persist_memorize();
    }

    pub fn set_repeat_count(&mut self, count: u32) {
        self.memorize.repeat_count = count.max(1);
        self.persist_memorize();
    }

    pub fn store_test_questions(&mut self, questions: Vec<TestQuestion>) {
        self.memorize.test_questions = questions;
        self.persist_memorize();
    }

    pub fn clear_test_questions(&mut self) {
        if self.memorize.test_questions.is_empty() {
            return;
        }
        self.memorize.test_questions.clear();
        self.persist_memorize();
    }

    // ---- azkar -----------------------------------------------------

    fn persist_azkar_progress(&mut self) {
        self.store
            .set_document(keys::AZKAR_PROGRESS, &self.azkar.progress);
    }

    fn reward_zikr(&mut self, advance: ZikrAdvance) {
        if advance != ZikrAdvance::Unchanged {
            self.persist_azkar_progress();
        }
        if advance == ZikrAdvance::Completed {
            self.add_points(ZIKR_COMPLETION_POINTS);
        }
    }

    pub fn increment_zikr(&mut self, category: ZikrCategory, index: usize, step: u32) -> ZikrAdvance {
        let advance = self.azkar.increment(category, index, step);
        self.reward_zikr(advance);
        advance
    }

    pub fn decrement_zikr(&mut self, category: ZikrCategory, index: usize, step: u32) {
        if self.azkar.decrement(category, index, step) {
            self.persist_azkar_progress();
        }
    }

    pub fn complete_zikr(&mut self, category: ZikrCategory, index: usize) -> ZikrAdvance {
        let advance = self.azkar.complete_item(category, index);
        self.reward_zikr(advance);
        advance
    }

    pub fn reset_azkar_category(&mut self, category: ZikrCategory) {
        self.azkar.reset_category(category);
        self.persist_azkar_progress();
    }

    pub fn set_azkar_tab(&mut self, category: ZikrCategory) {
        self.azkar.active_tab = category;
        self.store.set(keys::AZKAR_ACTIVE_TAB, category.as_str());
    }
}

fn dedup_bookmarks(bookmarks: &mut Vec<Bookmark>) {
    let mut seen: Vec<(u16, u16)> = Vec::with_capacity(bookmarks.len());
    bookmarks.retain(|b| {
        let key = (b.surah, b.verse);
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
}
