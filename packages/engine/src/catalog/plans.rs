//! Memorization plans, review patterns and related content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Full,
    Juz,
    Surah,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorizationPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: PlanKind,
    pub target_amount: u32,
    pub duration_days: u32,
    pub daily_amount: u32,
    pub icon: &'static str,
}

static PLANS: [MemorizationPlan; 8] = [
    MemorizationPlan {
        id: "khatma-1year",
        name: "ختمة في سنة",
        description: "حفظ القرآن كاملاً في سنة واحدة",
        kind: PlanKind::Full,
        target_amount: 6236,
        duration_days: 365,
        daily_amount: 17,
        icon: "📖",
    },
    MemorizationPlan {
        id: "khatma-6months",
        name: "ختمة في 6 أشهر",
        description: "حفظ القرآن كاملاً في 6 أشهر (35 آية يومياً)",
        kind: PlanKind::Full,
        target_amount: 6236,
        duration_days: 180,
        daily_amount: 35,
        icon: "⚡",
    },
    MemorizationPlan {
        id: "juz-30",
        name: "حفظ الجزء 30",
        description: "حفظ الجزء الثلاثين كاملاً (سورة قصيرة يومياً)",
        kind: PlanKind::Juz,
        target_amount: 564,
        duration_days: 37,
        daily_amount: 15,
        icon: "🌟",
    },
    MemorizationPlan {
        id: "juz-amma",
        name: "حفظ الأجزاء القصيرة",
        description: "حفظ الأجزاء من 28 إلى 30",
        kind: PlanKind::Juz,
        target_amount: 1500,
        duration_days: 50,
        daily_amount: 30,
        icon: "🎯",
    },
    MemorizationPlan {
        id: "surah-mulk",
        name: "حفظ سورة الملك",
        description: "حفظ سورة الملك (30 آية)",
        kind: PlanKind::Surah,
        target_amount: 30,
        duration_days: 7,
        daily_amount: 5,
        icon: "👑",
    },
    MemorizationPlan {
        id: "surah-kahf",
        name: "حفظ سورة الكهف",
        description: "حفظ سورة الكهف (110 آيات)",
        kind: PlanKind::Surah,
        target_amount: 110,
        duration_days: 14,
        daily_amount: 8,
        icon: "🏔️",
    },
    MemorizationPlan {
        id: "surah-yaseen",
        name: "حفظ سورة يس",
        description: "حفظ قلب القرآن (83 آية)",
        kind: PlanKind::Surah,
        target_amount: 83,
        duration_days: 10,
        daily_amount: 8,
        icon: "❤️",
    },
    MemorizationPlan {
        id: "custom",
        name: "خطة مخصصة",
        description: "حدد أنت كمية الحفظ اليومية",
        kind: PlanKind::Custom,
        target_amount: 0,
        duration_days: 0,
        daily_amount: 0,
        icon: "⚙️",
    },
];

pub fn plans() -> &'static [MemorizationPlan] {
    &PLANS
}

pub fn plan(id: &str) -> Option<&'static MemorizationPlan> {
    PLANS.iter().find(|p| p.id == id)
}

/// A review cadence: minutes between each repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPattern {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub intervals: &'static [u32],
}

static REVIEW_PATTERNS: [ReviewPattern; 4] = [
    ReviewPattern {
        id: "spaced",
        name: "المراجعة المتباعدة",
        description: "مراجعة بعد 10 دقائق، ساعة، يوم، 3 أيام، أسبوع",
        intervals: &[10, 60, 1440, 4320, 10080],
    },
    ReviewPattern {
        id: "intensive",
        name: "مراجعة مكثفة",
        description: "مراجعة كل 5 دقائق لمدة ساعة",
        intervals: &[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    },
    ReviewPattern {
        id: "daily",
        name: "مراجعة يومية",
        description: "مراجعة مرة واحدة يومياً",
        intervals: &[1440],
    },
    ReviewPattern {
        id: "before-sleep",
        name: "قبل النوم",
        description: "مراجعة مرة واحدة قبل النوم",
        intervals: &[1],
    },
];

pub fn review_patterns() -> &'static [ReviewPattern] {
    &REVIEW_PATTERNS
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorizationTip {
    pub title: &'static str,
    pub description: &'static str,
}

static TIPS: [MemorizationTip; 6] = [
    MemorizationTip {
        title: "استمع للآية 10 مرات",
        description: "استمع للآية من القارئ المفضل قبل محاولة الحفظ",
    },
    MemorizationTip {
        title: "اقرأ بصوت مسموع",
        description: "قراءة الآية بصوت مسموع تساعد على التثبيت",
    },
    MemorizationTip {
        title: "افهم المعنى",
        description: "اقرأ التفسير البسيط للآية قبل حفظها",
    },
    MemorizationTip {
        title: "راجع فوراً",
        description: "راجع الآية مباشرة بعد حفظها",
    },
    MemorizationTip {
        title: "اكتب الآية",
        description: "كتابة الآية تساعد على التذكر",
    },
    MemorizationTip {
        title: "صلِّ بالآية",
        description: "صلِّ بالآية التي حفظتها في الصلوات",
    },
];

pub fn tips() -> &'static [MemorizationTip] {
    &TIPS
}

/// Fixed weekly review rotation over the early surahs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyReview {
    pub day: &'static str,
    pub surahs: &'static [u16],
}

static WEEKLY_REVIEW: [WeeklyReview; 7] = [
    WeeklyReview { day: "السبت", surahs: &[1, 2, 3] },
    WeeklyReview { day: "الأحد", surahs: &[4, 5, 6] },
    WeeklyReview { day: "الاثنين", surahs: &[7, 8, 9] },
    WeeklyReview { day: "الثلاثاء", surahs: &[10, 11, 12] },
    WeeklyReview { day: "الأربعاء", surahs: &[13, 14, 15] },
    WeeklyReview { day: "الخميس", surahs: &[16, 17, 18] },
    WeeklyReview { day: "الجمعة", surahs: &[19, 20, 21] },
];

pub fn weekly_review_schedule() -> &'static [WeeklyReview] {
    &WEEKLY_REVIEW
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dua {
    pub text: &'static str,
    pub source: &'static str,
}

static POST_MEMORIZATION_DUAS: [Dua; 3] = [
    Dua {
        text: "اللهم اجعل القرآن ربيع قلبي ونور صدري وجلاء حزني وذهاب همي",
        source: "النسائي",
    },
    Dua {
        text: "اللهم ذكرني منه ما نسيت وعلمني منه ما جهلت وارزقني تلاوته آناء الليل وأطراف النهار",
        source: "دعاء",
    },
    Dua {
        text: "اللهم اجعلني من أهل القرآن الذين هم أهلك وخاصتك",
        source: "النسائي",
    },
];

pub fn post_memorization_duas() -> &'static [Dua] {
    &POST_MEMORIZATION_DUAS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ids_are_unique() {
        for p in PLANS.iter() {
            assert_eq!(PLANS.iter().filter(|x| x.id == p.id).count(), 1);
        }
    }

    #[test]
    fn plan_lookup() {
        let kahf = plan("surah-kahf").unwrap();
        assert_eq!(kahf.kind, PlanKind::Surah);
        assert_eq!(kahf.target_amount, 110);
        assert!(plan("missing").is_none());
    }

    #[test]
    fn review_patterns_have_intervals() {
        for p in review_patterns() {
            assert!(!p.intervals.is_empty());
        }
    }

    #[test]
    fn weekly_schedule_covers_seven_days() {
        assert_eq!(weekly_review_schedule().len(), 7);
    }
}
