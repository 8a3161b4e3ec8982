//! User progress: points, level, title, streak, reading history and the
//! activity timeline.
//!
//! `UserProgress` is the persisted document; the pure transition rules
//! live here so the state container in [`crate::store`] stays a thin
//! mutate-and-persist layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::gamification;

/// Reading history keeps the most recent entries only.
pub const MAX_READING_HISTORY: usize = 100;
/// Activity timeline capacity; older events are evicted silently.
pub const MAX_ACTIVITY_TIMELINE: usize = 120;

/// Points needed per level.
pub const POINTS_PER_LEVEL: u32 = 500;
/// One-time bonus granted on every 7th consecutive reading day.
pub const WEEKLY_STREAK_BONUS: u32 = 50;

/// Title shown before any points are earned; also the migration target
/// for the retired legacy starter title.
pub const DEFAULT_TITLE: &str = "المنطلق";
const LEGACY_TITLE: &str = "المبتدئ";

pub fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Reading,
    Memorization,
    Challenge,
    Favorite,
    Bookmark,
    Achievement,
}

/// One timeline entry. Tagged on `type` so the persisted JSON matches
/// the legacy document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityEvent {
    #[serde(rename_all = "camelCase")]
    Reading {
        date: DateTime<Utc>,
        surah: u16,
        verses: u16,
    },
    #[serde(rename_all = "camelCase")]
    Memorization { date: DateTime<Utc>, surah: u16 },
    #[serde(rename_all = "camelCase")]
    Challenge {
        date: DateTime<Utc>,
        challenge_id: u32,
    },
    #[serde(rename_all = "camelCase")]
    Favorite { date: DateTime<Utc>, surah: u16 },
    #[serde(rename_all = "camelCase")]
    Bookmark {
        date: DateTime<Utc>,
        surah: u16,
        verse: u16,
    },
    #[serde(rename_all = "camelCase")]
    Achievement {
        date: DateTime<Utc>,
        achievement_id: u32,
    },
}

impl ActivityEvent {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Reading { .. } => ActivityKind::Reading,
            Self::Memorization { .. } => ActivityKind::Memorization,
            Self::Challenge { .. } => ActivityKind::Challenge,
            Self::Favorite { .. } => ActivityKind::Favorite,
            Self::Bookmark { .. } => ActivityKind::Bookmark,
            Self::Achievement { .. } => ActivityKind::Achievement,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Self::Reading { date, .. }
            | Self::Memorization { date, .. }
            | Self::Challenge { date, .. }
            | Self::Favorite { date, .. }
            | Self::Bookmark { date, .. }
            | Self::Achievement { date, .. } => *date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingEntry {
    pub date: DateTime<Utc>,
    pub surah: u16,
    pub verses: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub points: u32,
    pub level: u32,
    pub title: String,
    /// Consecutive reading days.
    pub streak: u32,
    /// UTC calendar date (`YYYY-MM-DD`) of the last qualifying read;
    /// empty before the first one.
    pub last_read: String,
    /// Total verses read.
    pub total_read: u32,
    #[serde(deserialize_with = "lenient_vec")]
    pub memorized_surahs: Vec<u16>,
    #[serde(deserialize_with = "lenient_vec")]
    pub completed_challenges: Vec<u32>,
    #[serde(deserialize_with = "lenient_vec")]
    pub unlocked_achievements: Vec<u32>,
    #[serde(deserialize_with = "lenient_vec")]
    pub favorite_surahs: Vec<u16>,
    /// Newest first.
    #[serde(deserialize_with = "lenient_vec")]
    pub reading_history: Vec<ReadingEntry>,
    /// Newest first.
    #[serde(deserialize_with = "lenient_vec")]
    pub activity_timeline: Vec<ActivityEvent>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            title: DEFAULT_TITLE.to_string(),
            streak: 0,
            last_read: String::new(),
            total_read: 0,
            memorized_surahs: Vec::new(),
            completed_challenges: Vec::new(),
            unlocked_achievements: Vec::new(),
            favorite_surahs: Vec::new(),
            reading_history: Vec::new(),
            activity_timeline: Vec::new(),
        }
    }
}

/// A list field that is not a well-formed array decodes as empty rather
/// than failing the whole document.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl UserProgress {
    /// Repairs a freshly loaded document: migrates the legacy starter
    /// title, deduplicates id collections and enforces list capacities.
    pub fn normalize(mut self) -> Self {
        if self.title == LEGACY_TITLE {
            self.title = DEFAULT_TITLE.to_string();
        }
        dedup_in_order(&mut self.memorized_surahs);
        dedup_in_order(&mut self.completed_challenges);
        dedup_in_order(&mut self.unlocked_achievements);
        dedup_in_order(&mut self.favorite_surahs);
        self.reading_history.truncate(MAX_READING_HISTORY);
        self.activity_timeline.truncate(MAX_ACTIVITY_TIMELINE);
        self
    }

    /// Adds points and recomputes level and title from the new total.
    pub fn add_points(&mut self, points: u32) {
        self.points += points;
        self.level = level_for_points(self.points);
        self.title = gamification::title_for_points(self.points).to_string();
    }

    /// Prepends an event, evicting the oldest past capacity.
    pub fn push_activity(&mut self, event: ActivityEvent) {
        self.activity_timeline.insert(0, event);
        self.activity_timeline.truncate(MAX_ACTIVITY_TIMELINE);
    }

    /// Prepends a reading history entry, evicting the oldest past
    /// capacity.
    pub fn push_reading_entry(&mut self, entry: ReadingEntry) {
        self.reading_history.insert(0, entry);
        self.reading_history.truncate(MAX_READING_HISTORY);
    }
}

fn dedup_in_order<T: PartialEq + Copy>(items: &mut Vec<T>) {
    let mut seen: Vec<T> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(*item);
            true
        }
    });
}

/// Outcome of a streak advance on a day that counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakAdvance {
    pub streak: u32,
    pub bonus_points: u32,
}

/// Streak transition for a qualifying read on `today`.
///
/// Returns `None` when `last_read` already is `today` (same-day calls
/// are no-ops). Reading on exactly the next calendar day extends the
/// streak; any gap, or an unparseable `last_read`, restarts it at 1.
/// Every 7th consecutive day carries the weekly bonus.
pub fn advance_streak(last_read: &str, today: NaiveDate, current_streak: u32) -> Option<StreakAdvance> {
    let last = NaiveDate::parse_from_str(last_read, "%Y-%m-%d").ok();

    if last == Some(today) {
        return None;
    }

    let streak = match (last, today.pred_opt()) {
        (Some(last), Some(yesterday)) if last == yesterday => current_streak + 1,
        _ => 1,
    };

    let bonus_points = if streak % 7 == 0 {
        WEEKLY_STREAK_BONUS
    } else {
        0
    };

    Some(StreakAdvance {
        streak,
        bonus_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(499), 1);
        assert_eq!(level_for_points(500), 2);
        assert_eq!(level_for_points(1499), 3);
    }

    #[test]
    fn add_points_is_additive_and_recomputes_derived_fields() {
        let mut split = UserProgress::default();
        split.add_points(300);
        split.add_points(250);

        let mut single = UserProgress::default();
        single.add_points(550);

        assert_eq!(split.points, single.points);
        assert_eq!(split.level, single.level);
        assert_eq!(split.title, single.title);
        assert_eq!(split.level, 2);
        assert_eq!(split.title, "التالي للقرآن");
    }

    #[test]
    fn streak_same_day_is_noop() {
        assert_eq!(advance_streak("2026-08-07", date("2026-08-07"), 4), None);
    }

    #[test]
    fn streak_next_day_increments() {
        let advance = advance_streak("2026-08-06", date("2026-08-07"), 4).unwrap();
        assert_eq!(advance.streak, 5);
        assert_eq!(advance.bonus_points, 0);
    }

    #[test]
    fn streak_gap_resets_to_one() {
        let advance = advance_streak("2026-08-01", date("2026-08-07"), 9).unwrap();
        assert_eq!(advance.streak, 1);
    }

    #[test]
    fn first_read_starts_streak_at_one() {
        let advance = advance_streak("", date("2026-08-07"), 0).unwrap();
        assert_eq!(advance.streak, 1);
    }

    #[test]
    fn seventh_day_carries_bonus() {
        let advance = advance_streak("2026-08-06", date("2026-08-07"), 6).unwrap();
        assert_eq!(advance.streak, 7);
        assert_eq!(advance.bonus_points, WEEKLY_STREAK_BONUS);

        let advance = advance_streak("2026-08-06", date("2026-08-07"), 12).unwrap();
        assert_eq!(advance.streak, 13);
        assert_eq!(advance.bonus_points, 0);
    }

    #[test]
    fn month_boundary_counts_as_next_day() {
        let advance = advance_streak("2026-07-31", date("2026-08-01"), 2).unwrap();
        assert_eq!(advance.streak, 3);
    }

    #[test]
    fn timeline_evicts_oldest_past_capacity() {
        let mut progress = UserProgress::default();
        for challenge_id in 0..(MAX_ACTIVITY_TIMELINE as u32 + 5) {
            progress.push_activity(ActivityEvent::Challenge {
                date: Utc::now(),
                challenge_id,
            });
        }
        assert_eq!(progress.activity_timeline.len(), MAX_ACTIVITY_TIMELINE);
        // Newest first; the oldest five fell off the tail.
        match progress.activity_timeline.first() {
            Some(ActivityEvent::Challenge { challenge_id, .. }) => {
                assert_eq!(*challenge_id, MAX_ACTIVITY_TIMELINE as u32 + 4)
            }
            other => panic!("unexpected head: {other:?}"),
        }
    }

    #[test]
    fn normalize_migrates_legacy_title_and_dedupes() {
        let progress = UserProgress {
            title: "المبتدئ".to_string(),
            favorite_surahs: vec![2, 2, 18, 2],
            ..Default::default()
        };
        let normalized = progress.normalize();
        assert_eq!(normalized.title, DEFAULT_TITLE);
        assert_eq!(normalized.favorite_surahs, vec![2, 18]);
    }

    #[test]
    fn document_with_wrong_typed_list_still_decodes() {
        let raw = r#"{"points":70,"level":1,"title":"المنطلق","streak":2,
            "lastRead":"2026-08-01","totalRead":12,
            "memorizedSurahs":"oops","completedChallenges":[3],
            "unlockedAchievements":[],"favoriteSurahs":[],
            "readingHistory":[],"activityTimeline":[]}"#;
        let progress: UserProgress = serde_json::from_str(raw).unwrap();
        assert_eq!(progress.points, 70);
        assert!(progress.memorized_surahs.is_empty());
        assert_eq!(progress.completed_challenges, vec![3]);
    }

    #[test]
    fn document_with_missing_fields_uses_defaults() {
        let progress: UserProgress = serde_json::from_str(r#"{"points":20}"#).unwrap();
        assert_eq!(progress.points, 20);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.title, DEFAULT_TITLE);
    }

    #[test]
    fn activity_event_serializes_with_legacy_tag() {
        let event = ActivityEvent::Challenge {
            date: Utc::now(),
            challenge_id: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "challenge");
        assert_eq!(json["challengeId"], 3);
    }
}
