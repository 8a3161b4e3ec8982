//! Reciter table and per-reciter audio addressing.
//!
//! Full-surah recitations are served as static files: a reciter-specific
//! base URL plus the 3-digit zero-padded surah number.

/// Reciter id used when nothing is selected or the stored id is unknown.
pub const DEFAULT_RECITER_ID: &str = "7";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reciter {
    pub id: &'static str,
    pub name: &'static str,
    pub style: &'static str,
    pub audio_base: &'static str,
}

static RECITERS: [Reciter; 8] = [
    Reciter {
        id: "1",
        name: "عبد الباسط عبد الصمد",
        style: "مرتل",
        audio_base: "https://server7.mp3quran.net/basit/",
    },
    Reciter {
        id: "2",
        name: "محمود خليل الحصري",
        style: "مرتل",
        audio_base: "https://server13.mp3quran.net/husr/",
    },
    Reciter {
        id: "3",
        name: "مشاري راشد العفاسي",
        style: "مرتل",
        audio_base: "https://server8.mp3quran.net/afs/",
    },
    Reciter {
        id: "4",
        name: "سعد الغامدي",
        style: "مرتل",
        audio_base: "https://server6.mp3quran.net/ghamdi/",
    },
    Reciter {
        id: "5",
        name: "عبد الرحمن السديس",
        style: "مرتل",
        audio_base: "https://server11.mp3quran.net/sds/",
    },
    Reciter {
        id: "6",
        name: "ماهر المعيقلي",
        style: "مرتل",
        audio_base: "https://server12.mp3quran.net/maher/",
    },
    Reciter {
        id: "7",
        name: "ياسر الدوسري",
        style: "مرتل",
        audio_base: "https://server11.mp3quran.net/yasser/",
    },
    Reciter {
        id: "8",
        name: "ناصر القطامي",
        style: "مرتل",
        audio_base: "https://server6.mp3quran.net/qtm/",
    },
];

pub fn all() -> &'static [Reciter] {
    &RECITERS
}

pub fn reciter(id: &str) -> Option<&'static Reciter> {
    RECITERS.iter().find(|r| r.id == id)
}

/// Builds the full-surah audio URL for a reciter. Unknown reciter ids
/// fall back to the default reciter so playback always has a source.
pub fn surah_audio_url(reciter_id: &str, surah_number: u16) -> String {
    let base = reciter(reciter_id)
        .or_else(|| reciter(DEFAULT_RECITER_ID))
        .map(|r| r.audio_base)
        .unwrap_or_default();
    format!("{base}{surah_number:03}.mp3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reciter_exists() {
        assert!(reciter(DEFAULT_RECITER_ID).is_some());
    }

    #[test]
    fn url_is_zero_padded() {
        assert_eq!(
            surah_audio_url("1", 2),
            "https://server7.mp3quran.net/basit/002.mp3"
        );
        assert_eq!(
            surah_audio_url("7", 114),
            "https://server11.mp3quran.net/yasser/114.mp3"
        );
    }

    #[test]
    fn unknown_reciter_falls_back_to_default() {
        assert_eq!(surah_audio_url("99", 1), surah_audio_url("7", 1));
    }
}
