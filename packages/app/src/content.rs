//! Quran content API client.
//!
//! Fetches per-surah Uthmani text joined with a translation, and
//! per-hizb verse membership. Responses cache in memory per number;
//! the durable per-surah cache is layered on by [`crate::app::App`].
//! There is no retry policy: a failed fetch surfaces as an [`ApiError`]
//! for the caller to expose as a retryable state, and dropping the
//! future cancels the request.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use wird_engine::catalog::surahs::{HIZB_COUNT, SURAH_COUNT};
use wird_engine::Verse;

/// Translation resource joined onto the Arabic text.
const TRANSLATION_ID: u32 = 20;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid surah number: {0}")]
    InvalidSurah(u16),

    #[error("invalid hizb number: {0}")]
    InvalidHizb(u8),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {0}")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
struct VersesResponse {
    verses: Vec<ApiVerse>,
}

#[derive(Debug, Deserialize)]
struct ApiVerse {
    verse_key: String,
    text_uthmani: String,
    juz_number: u8,
    page_number: u16,
}

#[derive(Debug, Deserialize)]
struct TranslationsResponse {
    translations: Vec<ApiTranslation>,
}

#[derive(Debug, Deserialize)]
struct ApiTranslation {
    verse_key: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct HizbResponse {
    verses: Vec<HizbVerse>,
}

#[derive(Debug, Deserialize)]
struct HizbVerse {
    verse_key: String,
}

pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    surah_cache: HashMap<u16, Vec<Verse>>,
    hizb_cache: HashMap<u8, Vec<u16>>,
}

impl ContentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            surah_cache: HashMap::new(),
            hizb_cache: HashMap::new(),
        }
    }

    pub fn cached_surah(&self, surah: u16) -> Option<&Vec<Verse>> {
        self.surah_cache.get(&surah)
    }

    /// Seeds the in-memory cache, e.g. from the durable per-surah cache.
    pub fn prime_surah(&mut self, surah: u16, verses: Vec<Verse>) {
        if !verses.is_empty() {
            self.surah_cache.insert(surah, verses);
        }
    }

    /// Verses of a surah with translations, cached per surah number.
    pub async fn surah_verses(&mut self, surah: u16) -> Result<Vec<Verse>, ApiError> {
        if !(1..=SURAH_COUNT).contains(&surah) {
            return Err(ApiError::InvalidSurah(surah));
        }
        if let Some(cached) = self.surah_cache.get(&surah) {
            return Ok(cached.clone());
        }

        let verses_url = format!(
            "{}/quran/verses/uthmani?chapter_number={surah}",
            self.base_url
        );
        let translations_url = format!(
            "{}/quran/translations/{TRANSLATION_ID}?chapter_number={surah}&fields=verse_key,text",
            self.base_url
        );

        let (verses, translations) = tokio::join!(
            self.get_json::<VersesResponse>(&verses_url),
            self.get_json::<TranslationsResponse>(&translations_url)
        );

        let verses = verses?;
        // Missing translations degrade to Arabic-only verses.
        let translations = translations.unwrap_or_else(|err| {
            tracing::warn!(surah, error = %err, "translation fetch failed");
            TranslationsResponse {
                translations: Vec::new(),
            }
        });

        let joined = join_chapter(verses, translations);
        self.surah_cache.insert(surah, joined.clone());
        Ok(joined)
    }

    /// Ordered distinct surah numbers whose verses appear in a hizb.
    pub async fn hizb_surahs(&mut self, hizb: u8) -> Result<Vec<u16>, ApiError> {
        if !(1..=HIZB_COUNT).contains(&hizb) {
            return Err(ApiError::InvalidHizb(hizb));
        }
        if let Some(cached) = self.hizb_cache.get(&hizb) {
            return Ok(cached.clone());
        }

        let url = format!(
            "{}/verses/by_hizb/{hizb}?language=ar&words=false&per_page=300",
            self.base_url
        );
        let response = self.get_json::<HizbResponse>(&url).await?;

        let mut surahs = Vec::new();
        for verse in response.verses {
            if let Some(surah) = parse_surah_of_key(&verse.verse_key) {
                if !surahs.contains(&surah) {
                    surahs.push(surah);
                }
            }
        }

        self.hizb_cache.insert(hizb, surahs.clone());
        Ok(surahs)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

/// Surah part of a `"<surah>:<verse>"` key.
fn parse_surah_of_key(verse_key: &str) -> Option<u16> {
    verse_key.split(':').next()?.trim().parse().ok()
}

fn join_chapter(verses: VersesResponse, translations: TranslationsResponse) -> Vec<Verse> {
    let translation_map: HashMap<String, String> = translations
        .translations
        .into_iter()
        .map(|t| (t.verse_key, clean_translation(&t.text)))
        .collect();

    verses
        .verses
        .into_iter()
        .enumerate()
        .map(|(index, verse)| Verse {
            number: (index + 1) as u16,
            text: verse.text_uthmani.trim().to_string(),
            translation: translation_map
                .get(&verse.verse_key)
                .cloned()
                .unwrap_or_default(),
            juz: verse.juz_number,
            page: verse.page_number,
        })
        .collect()
}

/// Strips the footnote markup and entities translation texts arrive
/// with, then collapses whitespace.
fn clean_translation(text: &str) -> String {
    let without_sup = strip_element(text, "sup");
    let without_tags = strip_tags(&without_sup);
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes `<name ...>...</name>` elements including their content.
fn strip_element(input: &str, name: &str) -> String {
    let open = format!("<{name}");
    let close = format!("</{name}>");

    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(start) = input[cursor..].find(&open) {
        let start = cursor + start;
        output.push_str(&input[cursor..start]);
        match input[start..].find(&close) {
            Some(end) => cursor = start + end + close.len(),
            None => {
                // Unterminated element: drop the rest.
                cursor = input.len();
                break;
            }
        }
    }
    output.push_str(&input[cursor..]);
    output
}

/// Removes remaining `<...>` tags, keeping their content.
fn strip_tags(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => output.push(c),
            _ => {}
        }
    }
    output
}
