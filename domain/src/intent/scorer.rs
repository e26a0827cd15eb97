//! Intent scoring: keyword counts plus structural boosters.

use super::tables::{
    ARITHMETIC_PATTERN_BOOST, CITY_BOOST, COMPACT_CREDENTIAL_BOOST, DIGIT_OPERATOR_BOOST,
    KEYED_CREDENTIAL_BOOST, KEYED_CREDENTIAL_MIN_FIELDS, KEYWORD_TABLE, MATH_OPERATOR_CHARS,
    MATH_OPERATOR_WORD, PERCENT_OF_BOOST, URL_BOOST, find_city,
};
use crate::extraction::credentials::{has_compact_credentials, keyed_field_count};
use crate::extraction::qr::find_url;
use crate::tool::entities::ToolId;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PERCENT_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*%\s*of\s*\d+(?:\.\d+)?").expect("valid percent regex")
});

static OPERATOR_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(MATH_OPERATOR_WORD)))
        .expect("valid operator word regex")
});

static ARITHMETIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\d+(?:\.\d+)?\s*%\s*of\s*\d+(?:\.\d+)?",
        r"\d+(?:\.\d+)?\s*[-+*/×÷]\s*\d+(?:\.\d+)?",
        r"(?i)\d+(?:\.\d+)?\s+(?:plus|minus|times|divided\s+by|multiplied\s+by|multiply\s+by)\s+\d+(?:\.\d+)?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid arithmetic regex"))
    .collect()
});

/// Per-tool scores for one input. Every tool is present, zero included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentScore {
    scores: BTreeMap<ToolId, u32>,
}

impl IntentScore {
    pub fn get(&self, tool: ToolId) -> u32 {
        self.scores.get(&tool).copied().unwrap_or(0)
    }

    /// Scores in priority order
    pub fn iter(&self) -> impl Iterator<Item = (ToolId, u32)> + '_ {
        self.scores.iter().map(|(id, score)| (*id, *score))
    }

    /// The highest-scoring tool, or `None` when nothing scored.
    ///
    /// Ties go to the tool earliest in [`ToolId::ALL`].
    pub fn top(&self) -> Option<ToolId> {
        let mut best: Option<(ToolId, u32)> = None;
        for (id, score) in self.iter() {
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn into_map(self) -> BTreeMap<ToolId, u32> {
        self.scores
    }
}

/// Stateless keyword/pattern intent scorer.
pub struct IntentScorer;

impl IntentScorer {
    /// Score every tool against the input.
    ///
    /// Pure function of `input` and the static tables.
    pub fn score(input: &str) -> IntentScore {
        let lower = input.to_lowercase();
        let mut scores: BTreeMap<ToolId, u32> = ToolId::ALL.iter().map(|id| (*id, 0)).collect();

        for (tool, keywords) in KEYWORD_TABLE {
            let hits = keywords.iter().filter(|k| lower.contains(*k)).count() as u32;
            *scores.entry(*tool).or_default() += hits;
        }

        let mut boost = |tool: ToolId, amount: u32| *scores.entry(tool).or_default() += amount;

        let has_digit = lower.chars().any(|c| c.is_ascii_digit());
        let has_operator = lower.contains(MATH_OPERATOR_CHARS) || OPERATOR_WORD.is_match(&lower);
        if has_digit && has_operator {
            boost(ToolId::Calculator, DIGIT_OPERATOR_BOOST);
        }
        if PERCENT_OF.is_match(&lower) {
            boost(ToolId::Calculator, PERCENT_OF_BOOST);
        }
        if ARITHMETIC_PATTERNS.iter().any(|re| re.is_match(&lower)) {
            boost(ToolId::Calculator, ARITHMETIC_PATTERN_BOOST);
        }
        if find_url(input).is_some() {
            boost(ToolId::QrGenerator, URL_BOOST);
        }
        if find_city(input).is_some() {
            boost(ToolId::Weather, CITY_BOOST);
        }
        if has_compact_credentials(input) {
            boost(ToolId::Login, COMPACT_CREDENTIAL_BOOST);
        }
        if keyed_field_count(input) >= KEYED_CREDENTIAL_MIN_FIELDS {
            boost(ToolId::Login, KEYED_CREDENTIAL_BOOST);
        }

        IntentScore { scores }
    }

    /// Suggested tool for the input, if any tool scored above zero.
    pub fn suggest(input: &str) -> Option<ToolId> {
        Self::score(input).top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_is_deterministic() {
        let inputs = [
            "What's the weather in Beijing?",
            "Calculate 25 * 4 + 10",
            "生成二维码，内容是你好",
            "",
        ];
        for input in inputs {
            assert_eq!(IntentScorer::score(input), IntentScorer::score(input));
        }
    }

    #[test]
    fn test_weather_with_city() {
        let score = IntentScorer::score("What's the weather in Beijing?");
        assert_eq!(score.get(ToolId::Weather), 1 + CITY_BOOST);
        assert_eq!(score.top(), Some(ToolId::Weather));
    }

    #[test]
    fn test_city_alone_suggests_weather() {
        assert_eq!(IntentScorer::suggest("上海"), Some(ToolId::Weather));
    }

    #[test]
    fn test_calculator_digit_and_operator() {
        let score = IntentScorer::score("Calculate 25 * 4 + 10");
        assert_eq!(
            score.get(ToolId::Calculator),
            1 + DIGIT_OPERATOR_BOOST + ARITHMETIC_PATTERN_BOOST
        );
        assert_eq!(score.top(), Some(ToolId::Calculator));
    }

    #[test]
    fn test_percent_of_boosts_are_additive() {
        let score = IntentScorer::score("15% of 200");
        assert_eq!(
            score.get(ToolId::Calculator),
            DIGIT_OPERATOR_BOOST + PERCENT_OF_BOOST + ARITHMETIC_PATTERN_BOOST
        );
    }

    #[test]
    fn test_word_operator_pattern() {
        assert_eq!(IntentScorer::suggest("5 plus 3"), Some(ToolId::Calculator));
    }

    #[test]
    fn test_url_boosts_qr() {
        let score = IntentScorer::score("Generate QR code for https://apple.com");
        assert_eq!(score.get(ToolId::QrGenerator), 2 + URL_BOOST);
        assert_eq!(score.top(), Some(ToolId::QrGenerator));
    }

    #[test]
    fn test_compact_credentials_boost_login() {
        let score = IntentScorer::score("user and pwd is superadmin,0115");
        assert_eq!(score.get(ToolId::Login), 1 + COMPACT_CREDENTIAL_BOOST);
        assert_eq!(score.top(), Some(ToolId::Login));
    }

    #[test]
    fn test_operator_word_must_stand_alone() {
        let score = IntentScorer::score("translate 'I have 2 offers' to Chinese");
        assert_eq!(score.get(ToolId::Calculator), 0);
        assert_eq!(score.top(), Some(ToolId::Translator));

        for input in ["2 office chairs", "profile 7", "software 3"] {
            assert_eq!(IntentScorer::score(input).get(ToolId::Calculator), 0, "{input}");
        }
        assert_eq!(
            IntentScorer::score("3 out of 4").get(ToolId::Calculator),
            DIGIT_OPERATOR_BOOST
        );
    }

    #[test]
    fn test_keyed_credentials_boost_login() {
        let score =
            IntentScorer::score("username=alice password=secret123 site=https://example.com");
        assert_eq!(score.get(ToolId::Login), 2 + KEYED_CREDENTIAL_BOOST);
        assert_eq!(score.get(ToolId::Calculator), DIGIT_OPERATOR_BOOST);
        assert_eq!(score.top(), Some(ToolId::Login));

        // A single keyed field is not enough
        let score = IntentScorer::score("password=hunter2");
        assert_eq!(score.get(ToolId::Login), 1);
    }

    #[test]
    fn test_translator_and_palette_keywords() {
        assert_eq!(IntentScorer::suggest("translate 你好 to English"), Some(ToolId::Translator));
        assert_eq!(IntentScorer::suggest("give me a color palette"), Some(ToolId::ColorPalette));
        assert_eq!(IntentScorer::suggest("search for rust web frameworks"), Some(ToolId::Search));
    }

    #[test]
    fn test_no_suggestion_when_nothing_scores() {
        assert_eq!(IntentScorer::suggest("hello there"), None);
        assert_eq!(IntentScorer::suggest(""), None);
    }

    #[test]
    fn test_ties_resolve_by_priority_order() {
        // "weather" (weather) and "search" (search) score one each
        let score = IntentScorer::score("weather search");
        assert_eq!(score.get(ToolId::Weather), score.get(ToolId::Search));
        assert_eq!(score.top(), Some(ToolId::Weather));
    }

    #[test]
    fn test_every_tool_is_present() {
        let score = IntentScorer::score("anything");
        assert_eq!(score.iter().count(), ToolId::ALL.len());
    }
}
