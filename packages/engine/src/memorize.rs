//! Memorization session state and self-test generation.
//!
//! The slice tracks which verses of which surah the user has memorized,
//! plus the plan/verse/repeat sub-state the memorization view restores
//! on reopen. Awarding points for a completed surah goes through
//! [`crate::store::UserStore::mark_verse_memorized`], which consumes the
//! transitions reported here.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::types::Verse;

pub const DEFAULT_REPEAT_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemorizeState {
    pub selected_surah: u16,
    /// 1-based verse the session is parked on.
    pub current_verse: u16,
    pub selected_plan: Option<String>,
    /// Times each verse is repeated in loop mode.
    pub repeat_count: u32,
    /// Memorized verse numbers per surah, insertion-ordered.
    pub progress_by_surah: BTreeMap<u16, Vec<u16>>,
    /// Open self-test, if any, so it survives a reload.
    pub test_questions: Vec<TestQuestion>,
}

impl Default for MemorizeState {
    fn default() -> Self {
        Self {
            selected_surah: 1,
            current_verse: 1,
            selected_plan: None,
            repeat_count: DEFAULT_REPEAT_COUNT,
            progress_by_surah: BTreeMap::new(),
            test_questions: Vec::new(),
        }
    }
}

impl MemorizeState {
    pub fn memorized_verses(&self, surah: u16) -> &[u16] {
        self.progress_by_surah
            .get(&surah)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records a memorized verse. Returns false when it was already
    /// recorded.
    pub fn record_verse(&mut self, surah: u16, verse: u16) -> bool {
        let verses = self.progress_by_surah.entry(surah).or_default();
        if verses.contains(&verse) {
            return false;
        }
        verses.push(verse);
        true
    }

    pub fn is_surah_complete(&self, surah: u16, total_verses: u16) -> bool {
        total_verses > 0 && self.memorized_verses(surah).len() >= usize::from(total_verses)
    }

    pub fn remaining_verses(&self, surah: u16, total_verses: u16) -> u16 {
        total_verses.saturating_sub(self.memorized_verses(surah).len() as u16)
    }

    /// Completion percentage for the progress bar.
    pub fn progress_percent(&self, surah: u16, total_verses: u16) -> f64 {
        if total_verses == 0 {
            return 0.0;
        }
        self.memorized_verses(surah).len() as f64 / f64::from(total_verses) * 100.0
    }

    /// First verse not yet memorized, used as the next session target.
    pub fn next_unmemorized_verse(&self, surah: u16, total_verses: u16) -> u16 {
        let memorized = self.memorized_verses(surah);
        (1..=total_verses)
            .find(|v| !memorized.contains(v))
            .unwrap_or(1)
    }
}

/// Result of recording a verse against a surah with a known verse count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemorizeOutcome {
    AlreadyRecorded,
    Recorded { remaining: u16 },
    /// The recorded verse was the last one of the surah.
    SurahCompleted,
}

/// A fill-in-the-blank self-test question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    pub verse_number: u16,
    /// Verse text with the hidden word replaced by a blank.
    pub prompt: String,
    pub answer: String,
    /// Shuffled options, `answer` included.
    pub choices: Vec<String>,
}

const BLANK: &str = "____";

/// Generates up to `count` fill-in-the-blank questions from a surah's
/// verses. Seeded so a persisted test can be regenerated identically.
pub fn generate_fill_blank_test(verses: &[Verse], count: usize, seed: u64) -> Vec<TestQuestion> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut candidates: Vec<&Verse> = verses
        .iter()
        .filter(|v| v.text.split_whitespace().count() >= 2)
        .collect();
    candidates.shuffle(&mut rng);
    candidates.truncate(count);
    candidates.sort_by_key(|v| v.number);

    let word_pool: Vec<&str> = verses
        .iter()
        .flat_map(|v| v.text.split_whitespace())
        .filter(|w| w.chars().count() > 2)
        .collect();

    candidates
        .into_iter()
        .filter_map(|verse| {
            let words: Vec<&str> = verse.text.split_whitespace().collect();
            let long_indices: Vec<usize> = (0..words.len())
                .filter(|&i| words[i].chars().count() > 2)
                .collect();
            let hidden_index = if long_indices.is_empty() {
                rng.gen_range(0..words.len())
            } else {
                long_indices[rng.gen_range(0..long_indices.len())]
            };
            let answer = words[hidden_index].to_string();

            let mut blanked = words.clone();
            blanked[hidden_index] = BLANK;
            let prompt = blanked.join(" ");

            let mut choices = vec![answer.clone()];
            let mut distractors: Vec<&str> = word_pool
                .iter()
                .copied()
                .filter(|w| *w != answer)
                .collect();
            distractors.sort_unstable();
            distractors.dedup();
            distractors.shuffle(&mut rng);
            choices.extend(distractors.into_iter().take(3).map(str::to_string));
            choices.shuffle(&mut rng);

            if choices.len() < 2 {
                return None;
            }
            Some(TestQuestion {
                verse_number: verse.number,
                prompt,
                answer,
                choices,
            })
        })
        .collect()
}

/// Final score as a rounded percentage.
pub fn score_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(number: u16, text: &str) -> Verse {
        Verse {
            number,
            text: text.to_string(),
            translation: String::new(),
            juz: 1,
            page: 1,
        }
    }

    fn fatiha() -> Vec<Verse> {
        vec![
            verse(1, "بسم الله الرحمن الرحيم"),
            verse(2, "الحمد لله رب العالمين"),
            verse(3, "الرحمن الرحيم"),
            verse(4, "مالك يوم الدين"),
            verse(5, "إياك نعبد وإياك نستعين"),
            verse(6, "اهدنا الصراط المستقيم"),
            verse(7, "صراط الذين أنعمت عليهم غير المغضوب عليهم ولا الضالين"),
        ]
    }

    #[test]
    fn record_verse_is_idempotent() {
        let mut state = MemorizeState::default();
        assert!(state.record_verse(1, 1));
        assert!(!state.record_verse(1, 1));
        assert_eq!(state.memorized_verses(1), &[1]);
    }

    #[test]
    fn completion_tracking() {
        let mut state = MemorizeState::default();
        for v in 1..=6 {
            state.record_verse(1, v);
        }
        assert!(!state.is_surah_complete(1, 7));
        assert_eq!(state.remaining_verses(1, 7), 1);
        assert_eq!(state.next_unmemorized_verse(1, 7), 7);

        state.record_verse(1, 7);
        assert!(state.is_surah_complete(1, 7));
        assert_eq!(state.remaining_verses(1, 7), 0);
    }

    #[test]
    fn progress_percent_is_bounded() {
        let mut state = MemorizeState::default();
        assert_eq!(state.progress_percent(1, 0), 0.0);
        state.record_verse(1, 1);
        state.record_verse(1, 2);
        let percent = state.progress_percent(1, 4);
        assert!((percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn generated_test_is_deterministic_for_a_seed() {
        let verses = fatiha();
        let first = generate_fill_blank_test(&verses, 3, 42);
        let second = generate_fill_blank_test(&verses, 3, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn questions_hide_the_answer_and_offer_it() {
        let verses = fatiha();
        for question in generate_fill_blank_test(&verses, 5, 7) {
            assert!(question.prompt.contains(BLANK));
            assert!(question.choices.contains(&question.answer));
            assert!(question.choices.len() >= 2);
            let source = verses
                .iter()
                .find(|v| v.number == question.verse_number)
                .unwrap();
            assert!(source.text.contains(&question.answer));
        }
    }

    #[test]
    fn question_count_is_capped_by_material() {
        let verses = fatiha();
        assert!(generate_fill_blank_test(&verses, 50, 1).len() <= verses.len());
        assert!(generate_fill_blank_test(&[], 3, 1).is_empty());
    }

    #[test]
    fn score_rounds_to_percent() {
        assert_eq!(score_percent(0, 0), 0);
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(7, 7), 100);
    }
}
