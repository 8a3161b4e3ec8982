//! Daily azkar progress: per-item completion counters keyed
//! `<category>-<index>`, clamped to each dhikr's prescribed count.

use std::collections::BTreeMap;

use crate::catalog::azkar::{items, zikr_key, ZikrCategory};

/// Points awarded when an individual dhikr reaches its target count.
pub const ZIKR_COMPLETION_POINTS: u32 = 5;

/// Persisted counter map. Values above an item's target are clamped on
/// read, so stale or corrupt counts never overflow the UI.
pub type AzkarProgress = BTreeMap<String, u32>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AzkarState {
    pub progress: AzkarProgress,
    pub active_tab: ZikrCategory,
}

/// Result of advancing a counter; `Completed` means this call is the one
/// that reached the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZikrAdvance {
    Unchanged,
    Counted { remaining: u32 },
    Completed,
}

impl AzkarState {
    fn target(category: ZikrCategory, index: usize) -> Option<u32> {
        items(category).get(index).map(|z| z.count)
    }

    /// Current count for an item, clamped to its target.
    pub fn count(&self, category: ZikrCategory, index: usize) -> u32 {
        let target = Self::target(category, index).unwrap_or(0);
        self.progress
            .get(&zikr_key(category, index))
            .copied()
            .unwrap_or(0)
            .min(target)
    }

    pub fn is_item_complete(&self, category: ZikrCategory, index: usize) -> bool {
        match Self::target(category, index) {
            Some(target) => self.count(category, index) >= target,
            None => false,
        }
    }

    /// Advances an item's counter by `step` (at least 1).
    pub fn increment(&mut self, category: ZikrCategory, index: usize, step: u32) -> ZikrAdvance {
        let Some(target) = Self::target(category, index) else {
            return ZikrAdvance::Unchanged;
        };
        let current = self.count(category, index);
        if current >= target {
            return ZikrAdvance::Unchanged;
        }

        let next = (current + step.max(1)).min(target);
        self.progress.insert(zikr_key(category, index), next);
        if next >= target {
            ZikrAdvance::Completed
        } else {
            ZikrAdvance::Counted {
                remaining: target - next,
            }
        }
    }

    /// Steps an item's counter back; never below zero and never a
    /// reward.
    pub fn decrement(&mut self, category: ZikrCategory, index: usize, step: u32) -> bool {
        let current = self.count(category, index);
        let next = current.saturating_sub(step.max(1));
        if next == current {
            return false;
        }
        self.progress.insert(zikr_key(category, index), next);
        true
    }

    /// Jumps an item straight to its target count.
    pub fn complete_item(&mut self, category: ZikrCategory, index: usize) -> ZikrAdvance {
        let Some(target) = Self::target(category, index) else {
            return ZikrAdvance::Unchanged;
        };
        if self.count(category, index) >= target {
            return ZikrAdvance::Unchanged;
        }
        self.progress.insert(zikr_key(category, index), target);
        ZikrAdvance::Completed
    }

    /// Clears every counter belonging to a category.
    pub fn reset_category(&mut self, category: ZikrCategory) {
        let prefix = format!("{}-", category.as_str());
        self.progress.retain(|key, _| !key.starts_with(&prefix));
    }

    pub fn is_category_complete(&self, category: ZikrCategory) -> bool {
        (0..items(category).len()).all(|index| self.is_item_complete(category, index))
    }

    /// Completion percentage across a category's items.
    pub fn category_percent(&self, category: ZikrCategory) -> f64 {
        let items = items(category);
        if items.is_empty() {
            return 0.0;
        }
        let total: u32 = items.iter().map(|z| z.count).sum();
        let done: u32 = (0..items.len())
            .map(|index| self.count(category, index))
            .sum();
        f64::from(done) / f64::from(total) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_counts_up_to_target() {
        let mut state = AzkarState::default();
        // morning-0 has a target of 1.
        assert_eq!(
            state.increment(ZikrCategory::Morning, 0, 1),
            ZikrAdvance::Completed
        );
        assert_eq!(
            state.increment(ZikrCategory::Morning, 0, 1),
            ZikrAdvance::Unchanged
        );
        assert_eq!(state.count(ZikrCategory::Morning, 0), 1);
    }

    #[test]
    fn large_step_clamps_to_target() {
        let mut state = AzkarState::default();
        // morning-2 is the 100x tasbih.
        assert_eq!(
            state.increment(ZikrCategory::Morning, 2, 250),
            ZikrAdvance::Completed
        );
        assert_eq!(state.count(ZikrCategory::Morning, 2), 100);
    }

    #[test]
    fn decrement_reopens_an_item() {
        let mut state = AzkarState::default();
        state.complete_item(ZikrCategory::Sleep, 0);
        assert!(state.is_item_complete(ZikrCategory::Sleep, 0));

        assert!(state.decrement(ZikrCategory::Sleep, 0, 1));
        assert!(!state.is_item_complete(ZikrCategory::Sleep, 0));
        assert!(!state.decrement(ZikrCategory::Sleep, 0, 1));
    }

    #[test]
    fn complete_item_rewards_only_once() {
        let mut state = AzkarState::default();
        assert_eq!(
            state.complete_item(ZikrCategory::Evening, 4),
            ZikrAdvance::Completed
        );
        assert_eq!(
            state.complete_item(ZikrCategory::Evening, 4),
            ZikrAdvance::Unchanged
        );
    }

    #[test]
    fn stale_overcount_is_clamped_on_read() {
        let mut state = AzkarState::default();
        state
            .progress
            .insert("morning-0".to_string(), 999);
        assert_eq!(state.count(ZikrCategory::Morning, 0), 1);
        assert!(state.is_item_complete(ZikrCategory::Morning, 0));
    }

    #[test]
    fn reset_category_only_touches_its_keys() {
        let mut state = AzkarState::default();
        state.complete_item(ZikrCategory::Morning, 0);
        state.complete_item(ZikrCategory::Evening, 0);

        state.reset_category(ZikrCategory::Morning);
        assert_eq!(state.count(ZikrCategory::Morning, 0), 0);
        assert!(state.is_item_complete(ZikrCategory::Evening, 0));
    }

    #[test]
    fn category_completion() {
        let mut state = AzkarState::default();
        assert!(!state.is_category_complete(ZikrCategory::Sleep));
        for index in 0..crate::catalog::azkar::items(ZikrCategory::Sleep).len() {
            state.complete_item(ZikrCategory::Sleep, index);
        }
        assert!(state.is_category_complete(ZikrCategory::Sleep));
        assert!((state.category_percent(ZikrCategory::Sleep) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_item_is_inert() {
        let mut state = AzkarState::default();
        assert_eq!(
            state.increment(ZikrCategory::Morning, 99, 1),
            ZikrAdvance::Unchanged
        );
        assert_eq!(state.count(ZikrCategory::Morning, 99), 0);
    }
}
