//! Extractors for the free-text tools: weather city, translation text and
//! language, search query, palette model.

use super::sanitizer::{sanitize, strip_prefix_ci};
use crate::intent::tables::find_city;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CITY_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:weather|temperature|forecast)\b.*?\b(?:in|for|at|of)\s+([^?？!！,，.。]+)")
        .expect("valid city phrase regex")
});

static CHINESE_CITY_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\p{Han}]{2,6}?)(?:今天|明天|现在|的)?(?:天气|气温|温度)").expect("valid chinese city regex")
});

static TRANSLATE_TO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(?:please\s+)?translate\s*:?\s*(.+?)\s+(?:to|into)\s+(english|chinese|mandarin|英文|中文|英语)\s*[.?!。]?\s*$")
        .expect("valid translate-to regex")
});

static TRANSLATE_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(?:please\s+)?(?:translate|翻译(?:一下)?)\s*[:：]?\s*(.+)$")
        .expect("valid translate regex")
});

static CHINESE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:把|将)?(.+?)(?:翻译|翻)成?(英文|中文|英语)").expect("valid chinese target regex")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|“([^”]+)”"#).expect("valid quote regex"));

const SEARCH_LEAD_INS: &[&str] = &[
    "please search for",
    "search github for",
    "search for",
    "search",
    "look up",
    "lookup",
    "find information about",
    "find",
    "tell me about",
    "information about",
    "what is",
    "who is",
    "搜索一下",
    "搜索",
    "查找",
    "查询",
];

/// Translation languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Chinese",
        }
    }

    pub fn opposite(&self) -> Language {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    /// `zh` if any CJK unified ideograph is present, else `en`.
    pub fn detect(text: &str) -> Language {
        if text.chars().any(is_cjk) {
            Language::Zh
        } else {
            Language::En
        }
    }

    fn from_word(word: &str) -> Option<Language> {
        match word.to_lowercase().as_str() {
            "english" | "英文" | "英语" => Some(Language::En),
            "chinese" | "mandarin" | "中文" => Some(Language::Zh),
            _ => None,
        }
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF)
}

/// City for a weather request.
///
/// Gazetteer hit → canonical English name; otherwise a "weather in X" /
/// "X天气" phrase; otherwise the trimmed input.
pub fn extract_city(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(city) = find_city(trimmed) {
        return Some(city.to_string());
    }
    let phrase = CITY_PHRASE
        .captures(trimmed)
        .or_else(|| CHINESE_CITY_PHRASE.captures(trimmed))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().trim_start_matches("the ").to_string())
        .filter(|s| !s.is_empty());
    Some(phrase.unwrap_or_else(|| trimmed.to_string()))
}

/// Text to translate plus an explicit target language, if stated.
pub fn extract_translation(input: &str) -> Option<(String, Option<Language>)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (fragment, target) = if let Some(caps) = TRANSLATE_TO.captures(trimmed) {
        (caps[1].to_string(), Language::from_word(&caps[2]))
    } else if let Some(caps) = CHINESE_TARGET.captures(trimmed) {
        (caps[1].to_string(), Language::from_word(&caps[2]))
    } else if let Some(caps) = TRANSLATE_PLAIN.captures(trimmed) {
        (caps[1].to_string(), None)
    } else {
        (trimmed.to_string(), None)
    };

    // A quoted span inside the fragment is the precise text
    let fragment = QUOTED
        .captures(&fragment)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .unwrap_or(fragment);

    let text = sanitize(&fragment);
    (!text.is_empty()).then_some((text, target))
}

/// Search query with conversational lead-ins removed.
pub fn extract_search_query(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let query = strip_prefix_ci(trimmed, SEARCH_LEAD_INS)
        .trim()
        .trim_end_matches(['?', '？', '.', '。', '!', '！'])
        .trim();
    let query = if query.is_empty() { trimmed } else { query };
    (!query.is_empty()).then(|| sanitize(query))
}

/// Palette model: `ui` for interface-oriented requests, else `default`.
pub fn extract_palette_model(input: &str) -> String {
    let lower = input.to_lowercase();
    let mentions_ui = lower.split(|c: char| !c.is_alphanumeric()).any(|w| w == "ui")
        || lower.contains("interface")
        || lower.contains("界面");
    let model = if mentions_ui { "ui" } else { "default" };
    model.to_string()
}
