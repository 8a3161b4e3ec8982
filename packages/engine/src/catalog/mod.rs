//! Static reference data: the surah table, reciters, gamification
//! tables, memorization plans and azkar.
//!
//! Everything here is read-only from the application's perspective; the
//! mutable state that refers into these tables lives in [`crate::store`].

pub mod azkar;
pub mod gamification;
pub mod plans;
pub mod reciters;
pub mod surahs;

pub use azkar::{Zikr, ZikrCategory};
pub use gamification::{
    achievement, achievement_tier, challenge, filter_achievements, filter_challenges,
    title_for_points, Achievement, Challenge, Difficulty,
};
pub use plans::{MemorizationPlan, PlanKind, ReviewPattern};
pub use reciters::{reciter, surah_audio_url, Reciter, DEFAULT_RECITER_ID};
pub use surahs::{surah, Revelation, Surah, JUZ_COUNT, SURAH_COUNT, TOTAL_VERSES};

use crate::search;

/// Buckets used by the catalog length filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurahLength {
    Short,
    Medium,
    Long,
}

impl SurahLength {
    pub fn of(surah: &Surah) -> Self {
        match surah.verses {
            0..=49 => Self::Short,
            50..=149 => Self::Medium,
            _ => Self::Long,
        }
    }
}

/// Sort orders offered by the surah catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurahSort {
    /// Mushaf order, i.e. by surah number.
    #[default]
    Mushaf,
    Name,
    VersesAsc,
    VersesDesc,
}

/// Filter options for the surah catalog. `Default` selects everything in
/// mushaf order.
#[derive(Debug, Clone, Default)]
pub struct SurahFilter {
    /// Free-text query matched (diacritic-insensitively) against the
    /// Arabic name, transliteration and surah number.
    pub query: String,
    pub revelation: Option<Revelation>,
    pub length: Option<SurahLength>,
    pub juz: Option<u8>,
    /// Restrict to an explicit surah set (e.g. hizb membership fetched
    /// from the content API).
    pub surah_set: Option<Vec<u16>>,
    pub sort: SurahSort,
}

/// Applies a [`SurahFilter`] to the static surah table.
pub fn filter_surahs(filter: &SurahFilter) -> Vec<&'static Surah> {
    let mut items: Vec<&'static Surah> = surahs::all()
        .iter()
        .filter(|s| {
            if let Some(revelation) = filter.revelation {
                if s.revelation != revelation {
                    return false;
                }
            }
            if let Some(length) = filter.length {
                if SurahLength::of(s) != length {
                    return false;
                }
            }
            if let Some(juz) = filter.juz {
                if !s.spans_juz(juz) {
                    return false;
                }
            }
            if let Some(ref set) = filter.surah_set {
                if !set.contains(&s.number) {
                    return false;
                }
            }
            if filter.query.trim().is_empty() {
                return true;
            }
            search::matches(s.name, &filter.query)
                || search::matches(s.transliteration, &filter.query)
                || s.number.to_string() == filter.query.trim()
        })
        .collect();

    match filter.sort {
        SurahSort::Mushaf => {}
        SurahSort::Name => items.sort_by_key(|s| s.name),
        SurahSort::VersesAsc => items.sort_by_key(|s| s.verses),
        SurahSort::VersesDesc => items.sort_by_key(|s| std::cmp::Reverse(s.verses)),
    }
    items
}

/// First surah reached in the given juz, used as the jump target when a
/// juz card is opened.
pub fn first_surah_in_juz(juz: u8) -> u16 {
    surahs::all()
        .iter()
        .find(|s| s.spans_juz(juz))
        .map(|s| s.number)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_returns_whole_catalog() {
        assert_eq!(filter_surahs(&SurahFilter::default()).len(), 114);
    }

    #[test]
    fn query_matches_vocalized_name() {
        let filter = SurahFilter {
            query: "الكهف".into(),
            ..Default::default()
        };
        let hits = filter_surahs(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].number, 18);
    }

    #[test]
    fn query_matches_number() {
        let filter = SurahFilter {
            query: "36".into(),
            ..Default::default()
        };
        let hits = filter_surahs(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].transliteration, "Ya-Sin");
    }

    #[test]
    fn juz_thirty_filter() {
        let filter = SurahFilter {
            juz: Some(30),
            ..Default::default()
        };
        let hits = filter_surahs(&filter);
        assert_eq!(hits.first().map(|s| s.number), Some(78));
        assert_eq!(hits.len(), 37);
    }

    #[test]
    fn verses_desc_puts_baqarah_first() {
        let filter = SurahFilter {
            sort: SurahSort::VersesDesc,
            ..Default::default()
        };
        assert_eq!(filter_surahs(&filter)[0].number, 2);
    }

    #[test]
    fn first_surah_in_juz_lookup() {
        assert_eq!(first_surah_in_juz(1), 1);
        assert_eq!(first_surah_in_juz(30), 78);
        assert_eq!(first_surah_in_juz(0), 1);
    }
}
