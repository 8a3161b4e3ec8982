//! Daily azkar content, grouped into the four categories the azkar page
//! offers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum ZikrCategory {
    #[default]
    Morning,
    Evening,
    AfterPrayer,
    Sleep,
}

impl ZikrCategory {
    pub const ALL: [ZikrCategory; 4] = [
        Self::Morning,
        Self::Evening,
        Self::AfterPrayer,
        Self::Sleep,
    ];

    /// Stable key used in persisted progress maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
            Self::AfterPrayer => "afterPrayer",
            Self::Sleep => "sleep",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Self::Morning),
            "evening" => Some(Self::Evening),
            "afterPrayer" => Some(Self::AfterPrayer),
            "sleep" => Some(Self::Sleep),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "أذكار الصباح",
            Self::Evening => "أذكار المساء",
            Self::AfterPrayer => "أذكار بعد الصلاة",
            Self::Sleep => "أذكار النوم",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zikr {
    pub text: &'static str,
    /// Prescribed repetition count.
    pub count: u32,
    pub source: &'static str,
}

static MORNING: [Zikr; 6] = [
    Zikr {
        text: "أصبحنا وأصبح الملك لله، والحمد لله، لا إله إلا الله وحده لا شريك له",
        count: 1,
        source: "مسلم",
    },
    Zikr {
        text: "اللهم بك أصبحنا وبك أمسينا وبك نحيا وبك نموت وإليك النشور",
        count: 1,
        source: "الترمذي",
    },
    Zikr {
        text: "سبحان الله وبحمده",
        count: 100,
        source: "مسلم",
    },
    Zikr {
        text: "لا إله إلا الله وحده لا شريك له، له الملك وله الحمد وهو على كل شيء قدير",
        count: 10,
        source: "النسائي",
    },
    Zikr {
        text: "اللهم إني أسألك العفو والعافية في الدنيا والآخرة",
        count: 1,
        source: "ابن ماجه",
    },
    Zikr {
        text: "أعوذ بكلمات الله التامات من شر ما خلق",
        count: 3,
        source: "مسلم",
    },
];

static EVENING: [Zikr; 5] = [
    Zikr {
        text: "أمسينا وأمسى الملك لله، والحمد لله، لا إله إلا الله وحده لا شريك له",
        count: 1,
        source: "مسلم",
    },
    Zikr {
        text: "اللهم بك أمسينا وبك أصبحنا وبك نحيا وبك نموت وإليك المصير",
        count: 1,
        source: "الترمذي",
    },
    Zikr {
        text: "بسم الله الذي لا يضر مع اسمه شيء في الأرض ولا في السماء وهو السميع العليم",
        count: 3,
        source: "أبو داود",
    },
    Zikr {
        text: "رضيت بالله رباً وبالإسلام ديناً وبمحمد صلى الله عليه وسلم نبياً",
        count: 3,
        source: "أبو داود",
    },
    Zikr {
        text: "أستغفر الله العظيم وأتوب إليه",
        count: 100,
        source: "متفق عليه",
    },
];

static AFTER_PRAYER: [Zikr; 5] = [
    Zikr {
        text: "أستغفر الله",
        count: 3,
        source: "مسلم",
    },
    Zikr {
        text: "اللهم أنت السلام ومنك السلام تباركت يا ذا الجلال والإكرام",
        count: 1,
        source: "مسلم",
    },
    Zikr {
        text: "سبحان الله",
        count: 33,
        source: "متفق عليه",
    },
    Zikr {
        text: "الحمد لله",
        count: 33,
        source: "متفق عليه",
    },
    Zikr {
        text: "الله أكبر",
        count: 34,
        source: "متفق عليه",
    },
];

static SLEEP: [Zikr; 4] = [
    Zikr {
        text: "باسمك اللهم أموت وأحيا",
        count: 1,
        source: "البخاري",
    },
    Zikr {
        text: "اللهم قني عذابك يوم تبعث عبادك",
        count: 3,
        source: "أبو داود",
    },
    Zikr {
        text: "سبحان الله",
        count: 33,
        source: "متفق عليه",
    },
    Zikr {
        text: "الله أكبر",
        count: 34,
        source: "متفق عليه",
    },
];

/// Items of a category, in display order.
pub fn items(category: ZikrCategory) -> &'static [Zikr] {
    match category {
        ZikrCategory::Morning => &MORNING,
        ZikrCategory::Evening => &EVENING,
        ZikrCategory::AfterPrayer => &AFTER_PRAYER,
        ZikrCategory::Sleep => &SLEEP,
    }
}

/// Persisted-progress key for one item: `<category>-<index>`.
pub fn zikr_key(category: ZikrCategory, index: usize) -> String {
    format!("{}-{index}", category.as_str())
}
