//! QR payload extraction.
//!
//! Stages are tried in order and the first hit wins:
//!
//! 1. first well-formed URL
//! 2. quoted substring (double, Chinese, then single quotes)
//! 3. English intent phrasing ("generate ... qr ... for <rest>")
//! 4. Chinese intent phrasing ("生成二维码，<rest>", "把<rest>生成二维码")
//! 5. known lead-in phrase stripped from the start
//! 6. the whole trimmed input
//!
//! Whatever stage matched, the fragment goes through [`sanitize`].

use super::sanitizer::{sanitize, strip_prefix_ci};
use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s"'“”‘’<>，。、；！？]+"#).expect("valid url regex")
});

static QUOTED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r#""([^"]+)""#, r"“([^”]+)”", r"‘([^’]+)’", r"'([^']+)'"]
        .iter()
        .map(|p| Regex::new(p).expect("valid quote regex"))
        .collect()
});

static ENGLISH_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\b(?:generate|create|make|build)\b.*?\bqr(?:\s*-?\s*code)?\b\s*(?:for|with|of|containing|from|:)\s*(.+)$",
    )
    .expect("valid english intent regex")
});

static CHINESE_INTENTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?s)(?:把|将)(.+?)(?:生成|做成|转成|转换成)(?:一个|一张)?二维码",
        r"(?s)(?:为|给)(.+?)(?:生成|创建|制作)(?:一个|一张)?二维码",
        r"(?s)(?:生成|创建|制作)(?:一个|一张)?二维码\s*[，,：:]?\s*(.+)$",
        r"(?s)^(.+?)的二维码",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid chinese intent regex"))
    .collect()
});

const QR_LEAD_INS: &[&str] = &[
    "please generate a qr code for ",
    "generate a qr code for ",
    "generate qr code for ",
    "create a qr code for ",
    "create qr code for ",
    "make a qr code for ",
    "make qr code for ",
    "qr code for ",
    "qrcode for ",
    "qr for ",
    "qr code: ",
    "qr code:",
    "qr: ",
    "qr:",
    "二维码：",
    "二维码:",
];

/// Extract the QR payload from free-form input.
///
/// Returns `None` only for blank input.
pub fn extract_qr_payload(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let fragment = find_url(trimmed)
        .or_else(|| find_quoted(trimmed))
        .or_else(|| capture(&ENGLISH_INTENT, trimmed))
        .or_else(|| CHINESE_INTENTS.iter().find_map(|re| capture(re, trimmed)))
        .or_else(|| strip_lead_in(trimmed))
        .unwrap_or(trimmed);

    Some(sanitize(fragment))
}

/// First URL in the text, without trailing sentence punctuation.
pub fn find_url(text: &str) -> Option<&str> {
    URL_PATTERN
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')', ';', ':', '!', '?']))
}

fn find_quoted(text: &str) -> Option<&str> {
    QUOTED_PATTERNS.iter().find_map(|re| capture(re, text))
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

fn strip_lead_in(text: &str) -> Option<&str> {
    let stripped = strip_prefix_ci(text, QR_LEAD_INS);
    (stripped.len() != text.len() && !stripped.trim().is_empty()).then_some(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_wins() {
        assert_eq!(
            extract_qr_payload("Generate QR code for https://apple.com").as_deref(),
            Some("https://apple.com")
        );
        assert_eq!(
            extract_qr_payload("make a qr for https://example.com/a?b=1.").as_deref(),
            Some("https://example.com/a?b=1")
        );
    }

    #[test]
    fn test_braces_payload_is_not_mangled() {
        assert_eq!(
            extract_qr_payload("Generate QR code for {key:value}").as_deref(),
            Some("{key:value}")
        );
    }

    #[test]
    fn test_chinese_content_phrase() {
        assert_eq!(
            extract_qr_payload("生成二维码，内容是你好").as_deref(),
            Some("你好")
        );
        assert_eq!(
            extract_qr_payload("把我的微信号生成二维码").as_deref(),
            Some("我的微信号")
        );
    }

    #[test]
    fn test_quoted_payload() {
        assert_eq!(
            extract_qr_payload("QR please: \"Meet at 5pm\"").as_deref(),
            Some("Meet at 5pm")
        );
        assert_eq!(
            extract_qr_payload("二维码 “欢迎光临”").as_deref(),
            Some("欢迎光临")
        );
    }

    #[test]
    fn test_english_intent_with_connector() {
        assert_eq!(
            extract_qr_payload("Please create a QR code with the text is hello there").as_deref(),
            Some("hello there")
        );
    }

    #[test]
    fn test_lead_in_stripping() {
        assert_eq!(
            extract_qr_payload("qr: wifi password 1234").as_deref(),
            Some("wifi password 1234")
        );
    }

    #[test]
    fn test_falls_back_to_whole_input() {
        assert_eq!(
            extract_qr_payload("  plain payload  ").as_deref(),
            Some("plain payload")
        );
    }

    #[test]
    fn test_blank_input() {
        assert!(extract_qr_payload("   ").is_none());
    }
}
