use serde::{Deserialize, Serialize};

/// A single verse as rendered by the reader: Uthmani text plus an
/// optional translation, with its mushaf coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// 1-based verse number within the surah.
    pub number: u16,
    pub text: String,
    #[serde(default)]
    pub translation: String,
    pub juz: u8,
    pub page: u16,
}

/// A saved bookmark, unique by (surah, verse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub surah: u16,
    pub verse: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Last reading position, restored when the reader reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPosition {
    pub surah: u16,
    pub verse: u16,
}
