//! Gamification tables: the points-threshold title ladder, daily
//! challenges and achievements.

use serde::{Deserialize, Serialize};

use crate::search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }

    /// Arabic label shown on challenge cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "سهل",
            Self::Medium => "متوسط",
            Self::Hard => "صعب",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub min_points: u32,
    pub name: &'static str,
}

/// Title ladder, highest threshold first. The title for a total is the
/// first entry whose threshold the total reaches.
static TITLES: [Title; 6] = [
    Title {
        min_points: 5000,
        name: "خادم القرآن",
    },
    Title {
        min_points: 2500,
        name: "الحافظ المتقن",
    },
    Title {
        min_points: 1000,
        name: "الحافظ الصاعد",
    },
    Title {
        min_points: 500,
        name: "التالي للقرآن",
    },
    Title {
        min_points: 100,
        name: "القارئ المواظب",
    },
    Title {
        min_points: 0,
        name: "المنطلق",
    },
];

pub fn titles() -> &'static [Title] {
    &TITLES
}

/// Resolves the display title for a points total.
pub fn title_for_points(points: u32) -> &'static str {
    TITLES
        .iter()
        .find(|t| points >= t.min_points)
        .map(|t| t.name)
        .unwrap_or("المنطلق")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u32,
    pub difficulty: Difficulty,
}

static DAILY_CHALLENGES: [Challenge; 12] = [
    Challenge {
        id: 1,
        title: "ورد الفجر",
        description: "اقرأ صفحة واحدة بعد صلاة الفجر",
        points: 10,
        difficulty: Difficulty::Easy,
    },
    Challenge {
        id: 2,
        title: "قراءة الفاتحة",
        description: "اقرأ سورة الفاتحة بتدبر",
        points: 5,
        difficulty: Difficulty::Easy,
    },
    Challenge {
        id: 3,
        title: "آيات الكرسي",
        description: "اقرأ آية الكرسي وتدبر معانيها",
        points: 20,
        difficulty: Difficulty::Easy,
    },
    Challenge {
        id: 4,
        title: "خواتيم البقرة",
        description: "اقرأ الآيتين الأخيرتين من سورة البقرة",
        points: 15,
        difficulty: Difficulty::Easy,
    },
    Challenge {
        id: 5,
        title: "ورد يس",
        description: "اقرأ سورة يس كاملة",
        points: 30,
        difficulty: Difficulty::Medium,
    },
    Challenge {
        id: 6,
        title: "جمعة الكهف",
        description: "اقرأ سورة الكهف يوم الجمعة",
        points: 40,
        difficulty: Difficulty::Medium,
    },
    Challenge {
        id: 7,
        title: "حفظ آية جديدة",
        description: "احفظ آية لم تحفظها من قبل",
        points: 25,
        difficulty: Difficulty::Medium,
    },
    Challenge {
        id: 8,
        title: "الاستماع للتلاوة",
        description: "استمع لتلاوة سورة كاملة من قارئك المفضل",
        points: 15,
        difficulty: Difficulty::Easy,
    },
    Challenge {
        id: 9,
        title: "ورد الملك",
        description: "اقرأ سورة الملك قبل النوم",
        points: 30,
        difficulty: Difficulty::Medium,
    },
    Challenge {
        id: 10,
        title: "جزء كامل",
        description: "اقرأ جزءاً كاملاً في يوم واحد",
        points: 60,
        difficulty: Difficulty::Hard,
    },
    Challenge {
        id: 11,
        title: "مراجعة المحفوظ",
        description: "راجع سورة محفوظة دون النظر إلى المصحف",
        points: 35,
        difficulty: Difficulty::Hard,
    },
    Challenge {
        id: 12,
        title: "أذكار الصباح والمساء",
        description: "أكمل أذكار الصباح والمساء في يومهما",
        points: 20,
        difficulty: Difficulty::Easy,
    },
];

pub fn daily_challenges() -> &'static [Challenge] {
    &DAILY_CHALLENGES
}

pub fn challenge(id: u32) -> Option<&'static Challenge> {
    DAILY_CHALLENGES.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u32,
}

static ACHIEVEMENTS: [Achievement; 10] = [
    Achievement {
        id: 1,
        title: "البداية المباركة",
        description: "أكمل أول جلسة قراءة",
        points: 10,
    },
    Achievement {
        id: 2,
        title: "أسبوع من النور",
        description: "حافظ على سلسلة قراءة لسبعة أيام",
        points: 50,
    },
    Achievement {
        id: 3,
        title: "حافظ الفاتحة",
        description: "احفظ سورة الفاتحة",
        points: 20,
    },
    Achievement {
        id: 4,
        title: "قارئ المئة",
        description: "اقرأ مئة آية",
        points: 30,
    },
    Achievement {
        id: 5,
        title: "صاحب التحديات",
        description: "أكمل خمسة تحديات يومية",
        points: 40,
    },
    Achievement {
        id: 6,
        title: "حافظ جزء عم",
        description: "احفظ جميع سور الجزء الثلاثين",
        points: 200,
    },
    Achievement {
        id: 7,
        title: "شهر المواظبة",
        description: "حافظ على سلسلة قراءة لثلاثين يوماً",
        points: 150,
    },
    Achievement {
        id: 8,
        title: "قارئ الألف",
        description: "اقرأ ألف آية",
        points: 100,
    },
    Achievement {
        id: 9,
        title: "جامع الفضائل",
        description: "احفظ سور الملك ويس والكهف",
        points: 120,
    },
    Achievement {
        id: 10,
        title: "خاتم التحديات",
        description: "أكمل جميع التحديات اليومية",
        points: 250,
    },
];

pub fn achievements() -> &'static [Achievement] {
    &ACHIEVEMENTS
}

pub fn achievement(id: u32) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Arabic tier label derived from an achievement's point value.
pub fn achievement_tier(points: u32) -> &'static str {
    match points {
        0..=29 => "برونزي",
        30..=99 => "فضي",
        _ => "ذهبي",
    }
}

/// Challenge cards matching a free-text query and optional difficulty.
/// The query is matched diacritic-insensitively against title,
/// description, difficulty label and point value.
pub fn filter_challenges(query: &str, difficulty: Option<Difficulty>) -> Vec<&'static Challenge> {
    DAILY_CHALLENGES
        .iter()
        .filter(|c| {
            if let Some(difficulty) = difficulty {
                if c.difficulty != difficulty {
                    return false;
                }
            }
            if query.trim().is_empty() {
                return true;
            }
            search::matches(c.title, query)
                || search::matches(c.description, query)
                || search::matches(c.difficulty.label(), query)
                || c.points.to_string() == query.trim()
        })
        .collect()
}

/// Achievement cards matching a free-text query, including by tier
/// label.
pub fn filter_achievements(query: &str) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| {
            if query.trim().is_empty() {
                return true;
            }
            search::matches(a.title, query)
                || search::matches(a.description, query)
                || search::matches(achievement_tier(a.points), query)
                || a.points.to_string() == query.trim()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_ladder_is_descending_and_grounded() {
        for pair in TITLES.windows(2) {
            assert!(pair[0].min_points > pair[1].min_points);
        }
        assert_eq!(TITLES.last().map(|t| t.min_points), Some(0));
    }

    #[test]
    fn title_for_points_picks_highest_reached() {
        assert_eq!(title_for_points(0), "المنطلق");
        assert_eq!(title_for_points(99), "المنطلق");
        assert_eq!(title_for_points(100), "القارئ المواظب");
        assert_eq!(title_for_points(2499), "الحافظ الصاعد");
        assert_eq!(title_for_points(1_000_000), "خادم القرآن");
    }

    #[test]
    fn challenge_ids_are_unique() {
        for c in DAILY_CHALLENGES.iter() {
            assert_eq!(
                DAILY_CHALLENGES.iter().filter(|x| x.id == c.id).count(),
                1
            );
        }
    }

    #[test]
    fn challenge_three_awards_twenty_points() {
        assert_eq!(challenge(3).map(|c| c.points), Some(20));
    }

    #[test]
    fn tiers_cover_the_tables() {
        assert_eq!(achievement_tier(10), "برونزي");
        assert_eq!(achievement_tier(40), "فضي");
        assert_eq!(achievement_tier(200), "ذهبي");
    }

    #[test]
    fn challenge_filter_by_difficulty_and_query() {
        let easy = filter_challenges("", Some(Difficulty::Easy));
        assert!(easy.iter().all(|c| c.difficulty == Difficulty::Easy));
        assert!(!easy.is_empty());

        let hits = filter_challenges("الكهف", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 6);

        let by_points = filter_challenges("60", None);
        assert!(by_points.iter().any(|c| c.id == 10));
    }

    #[test]
    fn achievement_filter_matches_tier_label() {
        let golden = filter_achievements("ذهبي");
        assert!(!golden.is_empty());
        assert!(golden.iter().all(|a| achievement_tier(a.points) == "ذهبي"));
    }

    #[test]
    fn difficulty_round_trips_through_parse() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::parse(d.as_str()), d);
        }
        assert_eq!(Difficulty::parse("unknown"), Difficulty::Easy);
    }
}
