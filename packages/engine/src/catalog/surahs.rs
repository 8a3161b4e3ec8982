//! The 114-surah table: names, verse counts, revelation place and the
//! juz span each surah falls into (Hafs/Uthmani numbering).

use serde::{Deserialize, Serialize};

pub const SURAH_COUNT: u16 = 114;
pub const JUZ_COUNT: u8 = 30;
pub const HIZB_COUNT: u8 = 60;
/// Total verse count across the mushaf.
pub const TOTAL_VERSES: u32 = 6236;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Revelation {
    Meccan,
    Medinan,
}

impl Revelation {
    /// Arabic label as displayed in the catalog filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meccan => "مكية",
            Self::Medinan => "مدنية",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surah {
    pub number: u16,
    /// Arabic name, without the "سورة" prefix.
    pub name: &'static str,
    pub transliteration: &'static str,
    pub verses: u16,
    pub revelation: Revelation,
    /// First and last juz this surah's text appears in (inclusive).
    juz_span: (u8, u8),
}

impl Surah {
    pub fn spans_juz(&self, juz: u8) -> bool {
        juz >= self.juz_span.0 && juz <= self.juz_span.1
    }

    pub fn juz_span(&self) -> (u8, u8) {
        self.juz_span
    }
}

/// Looks up a surah by its 1-based mushaf number.
pub fn surah(number: u16) -> Option<&'static Surah> {
    if number == 0 {
        return None;
    }
    SURAHS.get(usize::from(number) - 1)
}

/// The full table in mushaf order.
pub fn all() -> &'static [Surah] {
    &SURAHS
}

const fn s(
    number: u16,
    name: &'static str,
    transliteration: &'static str,
    verses: u16,
    revelation: Revelation,
    juz_first: u8,
    juz_last: u8,
) -> Surah {
    Surah {
        number,
        name,
        transliteration,
        verses,
        revelation,
        juz_span: (juz_first, juz_last),
    }
}

use Revelation::{Meccan, Medinan};

#[rustfmt::skip]
static SURAHS: [Surah; 114] = [
    s(1, "الفاتحة", "Al-Fatiha", 7, Meccan, 1, 1),
    s(2, "البقرة", "Al-Baqarah", 286, Medinan, 1, 3),
    s(3, "آل عمران", "Aal Imran", 200, Medinan, 3, 4),
    s(4, "النساء", "An-Nisa", 176, Medinan, 4, 6),
    s(5, "المائدة", "Al-Ma'idah", 120, Medinan, 6, 7),
    s(6, "الأنعام", "Al-An'am", 165, Meccan, 7, 8),
    s(7, "الأعراف", "Al-A'raf", 206, Meccan, 8, 9),
    s(8, "الأنفال", "Al-Anfal", 75, Medinan, 9, 10),
    s(9, "التوبة", "At-Tawbah", 129, Medinan, 10, 11),
    s(10, "يونس", "Yunus", 109, Meccan, 11, 11),
    s(11, "هود", "Hud", 123, Meccan, 11, 12),
    s(12, "يوسف", "Yusuf", 111, Meccan, 12, 13),
    s(13, "الرعد", "Ar-Ra'd", 43, Medinan, 13, 13),
    s(14, "إبراهيم", "Ibrahim", 52, Meccan, 13, 13),
    s(15, "الحجر", "Al-Hijr", 99, Meccan, 14, 14),
    s(16, "النحل", "An-Nahl", 128, Meccan, 14, 14),
    s(17, "الإسراء", "Al-Isra", 111, Meccan, 15, 15),
    s(18, "الكهف", "Al-Kahf", 110, Meccan, 15, 16),
    s(19, "مريم", "Maryam", 98, Meccan, 16, 16),
    s(20, "طه", "Taha", 135, Meccan, 16, 16),
    s(21, "الأنبياء", "Al-Anbiya", 112, Meccan, 17, 17),
    s(22, "الحج", "Al-Hajj", 78, Medinan, 17, 17),
    s(23, "المؤمنون", "Al-Mu'minun", 118, Meccan, 18, 18),
    s(24, "النور", "An-Nur", 64, Medinan, 18, 18),
    s(25, "الفرقان", "Al-Furqan", 77, Meccan, 18, 19),
    s(26, "الشعراء", "Ash-Shu'ara", 227, Meccan, 19, 19),
    s(27, "النمل", "An-Naml", 93, Meccan, 19, 20),
    s(28, "القصص", "Al-Qasas", 88, Meccan, 20, 20),
    s(29, "العنكبوت", "Al-Ankabut", 69, Meccan, 20, 21),
    s(30, "الروم", "Ar-Rum", 60, Meccan, 21, 21),
    s(31, "لقمان", "Luqman", 34, Meccan, 21, 21),
    s(32, "السجدة", "As-Sajdah", 30, Meccan, 21, 21),
    s(33, "الأحزاب", "Al-Ahzab", 73, Medinan, 21, 22),
    s(34, "سبأ", "Saba", 54, Meccan, 22, 22),
    s(35, "فاطر", "Fatir", 45, Meccan, 22, 22),
    s(36, "يس", "Ya-Sin", 83, Meccan, 22, 23),
    s(37, "الصافات", "As-Saffat", 182, Meccan, 23, 23),
    s(38, "ص", "Sad", 88, Meccan, 23, 23),
    s(39, "الزمر", "Az-Zumar", 75, Meccan, 23, 24),
    s(40, "غافر", "Ghafir", 85, Meccan, 24, 24),
    s(41, "فصلت", "Fussilat", 54, Meccan, 24, 25),
    s(42, "الشورى", "Ash-Shura", 53, Meccan, 25, 25),
    s(43, "الزخرف", "Az-Zukhruf", 89, Meccan, 25, 25),
    s(44, "الدخان", "Ad-Dukhan", 59, Meccan, 25, 25),
    s(45, "الجاثية", "Al-Jathiyah", 37, Meccan, 25, 25),
    s(46, "الأحقاف", "Al-Ahqaf", 35, Meccan, 26, 26),
    s(47, "محمد", "Muhammad", 38, Medinan, 26, 26),
    s(48, "الفتح", "Al-Fath", 29, Medinan, 26, 26),
    s(49, "الحجرات", "Al-Hujurat", 18, Medinan, 26, 26),
    s(50, "ق", "Qaf", 45, Meccan, 26, 26),
    s(51, "الذاريات", "Adh-Dhariyat", 60, Meccan, 26, 27),
    s(52, "الطور", "At-Tur", 49, Meccan, 27, 27),
    s(53, "النجم", "An-Najm", 62, Meccan, 27, 27),
    s(54, "القمر", "Al-Qamar", 55, Meccan, 27, 27),
    s(55, "الرحمن", "Ar-Rahman", 78, Medinan, 27, 27),
    s(56, "الواقعة", "Al-Waqi'ah", 96, Meccan, 27, 27),
    s(57, "الحديد", "Al-Hadid", 29, Medinan, 27, 27),
    s(58, "المجادلة", "Al-Mujadilah", 22, Medinan, 28, 28),
    s(59, "الحشر", "Al-Hashr", 24, Medinan, 28, 28),
    s(60, "الممتحنة", "Al-Mumtahanah", 13, Medinan, 28, 28),
    s(61, "الصف", "As-Saff", 14, Medinan, 28, 28),
    s(62, "الجمعة", "Al-Jumu'ah", 11, Medinan, 28, 28),
    s(63, "المنافقون", "Al-Munafiqun", 11, Medinan, 28, 28),
    s(64, "التغابن", "At-Taghabun", 18, Medinan, 28, 28),
    s(65, "الطلاق", "At-Talaq", 12, Medinan, 28, 28),
    s(66, "التحريم", "At-Tahrim", 12, Medinan, 28, 28),
    s(67, "الملك", "Al-Mulk", 30, Meccan, 29, 29),
    s(68, "القلم", "Al-Qalam", 52, Meccan, 29, 29),
    s(69, "الحاقة", "Al-Haqqah", 52, Meccan, 29, 29),
    s(70, "المعارج", "Al-Ma'arij", 44, Meccan, 29, 29),
    s(71, "نوح", "Nuh", 28, Meccan, 29, 29),
    s(72, "الجن", "Al-Jinn", 28, Meccan, 29, 29),
    s(73, "المزمل", "Al-Muzzammil", 20, Meccan, 29, 29),
    s(74, "المدثر", "Al-Muddaththir", 56, Meccan, 29, 29),
    s(75, "القيامة", "Al-Qiyamah", 40, Meccan, 29, 29),
    s(76, "الإنسان", "Al-Insan", 31, Medinan, 29, 29),
    s(77, "المرسلات", "Al-Mursalat", 50, Meccan, 29, 29),
    s(78, "النبأ", "An-Naba", 40, Meccan, 30, 30),
    s(79, "النازعات", "An-Nazi'at", 46, Meccan, 30, 30),
    s(80, "عبس", "Abasa", 42, Meccan, 30, 30),
    s(81, "التكوير", "At-Takwir", 29, Meccan, 30, 30),
    s(82, "الانفطار", "Al-Infitar", 19, Meccan, 30, 30),
    s(83, "المطففين", "Al-Mutaffifin", 36, Meccan, 30, 30),
    s(84, "الانشقاق", "Al-Inshiqaq", 25, Meccan, 30, 30),
    s(85, "البروج", "Al-Buruj", 22, Meccan, 30, 30),
    s(86, "الطارق", "At-Tariq", 17, Meccan, 30, 30),
    s(87, "الأعلى", "Al-A'la", 19, Meccan, 30, 30),
    s(88, "الغاشية", "Al-Ghashiyah", 26, Meccan, 30, 30),
    s(89, "الفجر", "Al-Fajr", 30, Meccan, 30, 30),
    s(90, "البلد", "Al-Balad", 20, Meccan, 30, 30),
    s(91, "الشمس", "Ash-Shams", 15, Meccan, 30, 30),
    s(92, "الليل", "Al-Layl", 21, Meccan, 30, 30),
    s(93, "الضحى", "Ad-Duha", 11, Meccan, 30, 30),
    s(94, "الشرح", "Ash-Sharh", 8, Meccan, 30, 30),
    s(95, "التين", "At-Tin", 8, Meccan, 30, 30),
    s(96, "العلق", "Al-Alaq", 19, Meccan, 30, 30),
    s(97, "القدر", "Al-Qadr", 5, Meccan, 30, 30),
    s(98, "البينة", "Al-Bayyinah", 8, Medinan, 30, 30),
    s(99, "الزلزلة", "Az-Zalzalah", 8, Medinan, 30, 30),
    s(100, "العاديات", "Al-Adiyat", 11, Meccan, 30, 30),
    s(101, "القارعة", "Al-Qari'ah", 11, Meccan, 30, 30),
    s(102, "التكاثر", "At-Takathur", 8, Meccan, 30, 30),
    s(103, "العصر", "Al-Asr", 3, Meccan, 30, 30),
    s(104, "الهمزة", "Al-Humazah", 9, Meccan, 30, 30),
    s(105, "الفيل", "Al-Fil", 5, Meccan, 30, 30),
    s(106, "قريش", "Quraysh", 4, Meccan, 30, 30),
    s(107, "الماعون", "Al-Ma'un", 7, Meccan, 30, 30),
    s(108, "الكوثر", "Al-Kawthar", 3, Meccan, 30, 30),
    s(109, "الكافرون", "Al-Kafirun", 6, Meccan, 30, 30),
    s(110, "النصر", "An-Nasr", 3, Medinan, 30, 30),
    s(111, "المسد", "Al-Masad", 5, Meccan, 30, 30),
    s(112, "الإخلاص", "Al-Ikhlas", 4, Meccan, 30, 30),
    s(113, "الفلق", "Al-Falaq", 5, Meccan, 30, 30),
    s(114, "الناس", "An-Nas", 6, Meccan, 30, 30),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete_and_ordered() {
        assert_eq!(SURAHS.len(), usize::from(SURAH_COUNT));
        for (index, surah) in SURAHS.iter().enumerate() {
            assert_eq!(usize::from(surah.number), index + 1);
            assert!(surah.verses > 0);
            let (first, last) = surah.juz_span();
            assert!(first >= 1 && last <= JUZ_COUNT && first <= last);
        }
    }

    #[test]
    fn verse_counts_sum_to_mushaf_total() {
        let total: u32 = SURAHS.iter().map(|s| u32::from(s.verses)).sum();
        assert_eq!(total, TOTAL_VERSES);
    }

    #[test]
    fn lookup_by_number() {
        assert_eq!(surah(1).map(|s| s.verses), Some(7));
        assert_eq!(surah(18).map(|s| s.name), Some("الكهف"));
        assert_eq!(surah(114).map(|s| s.transliteration), Some("An-Nas"));
        assert!(surah(0).is_none());
        assert!(surah(115).is_none());
    }

    #[test]
    fn juz_spans_are_monotonic() {
        let mut previous = 1;
        for surah in SURAHS.iter() {
            let (first, _) = surah.juz_span();
            assert!(first >= previous);
            previous = first;
        }
    }

    #[test]
    fn every_juz_is_reachable() {
        for juz in 1..=JUZ_COUNT {
            assert!(
                SURAHS.iter().any(|s| s.spans_juz(juz)),
                "no surah spans juz {juz}"
            );
        }
    }
}
