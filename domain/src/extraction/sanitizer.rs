//! Payload sanitization: turns a raw extracted fragment into a clean value.

/// Lead-in phrases stripped from the start of a payload (longest first
/// within each family so "the content is" wins over "content is").
const LEAD_IN_PHRASES: &[&str] = &[
    "the content is",
    "content is",
    "content:",
    "the text is",
    "text is",
    "text:",
    "the message is",
    "message is",
    "message:",
    "the payload is",
    "payload is",
    "payload:",
    "the data is",
    "data is",
    "data:",
    "内容是",
    "内容为",
    "内容：",
    "内容:",
    "文本是",
    "文本为",
    "文本：",
    "文字是",
    "信息是",
];

/// Characters trimmed from both ends. ASCII brackets and braces are kept so
/// structured payloads such as `{key:value}` or `[1,2]` survive intact.
const EDGE_PUNCTUATION: &[char] = &[
    ',', '，', '.', '。', ':', '：', ';', '；', '、', '!', '！', '?', '？', '-', '—', '（', '）',
    '【', '】', '「', '」', '《', '》',
];

const CONNECTORS: &[&str] = &["for ", "with ", "of ", "to "];

/// Symmetric quote pairs, one layer of which is removed.
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

/// Normalize a raw payload fragment.
///
/// Wrappers (quotes, lead-in phrases, edge punctuation) are peeled until the
/// value stops changing, then at most one leading connector is dropped. The
/// connector stays when what follows is another connector or still wrapped,
/// so `sanitize(sanitize(x)) == sanitize(x)`.
///
/// Never returns an empty string for non-blank input: if every step strips
/// the value away, the trimmed original is returned instead.
pub fn sanitize(text: &str) -> String {
    let original = text.trim();
    if original.is_empty() {
        return String::new();
    }

    let mut value = original;
    loop {
        let next = peel(value);
        if next == value {
            break;
        }
        value = next;
    }

    let rest = strip_prefix_ci(value, CONNECTORS).trim();
    if rest.len() < value.len() && !rest.is_empty() && is_settled(rest) {
        value = rest;
    }

    if value.is_empty() {
        original.to_string()
    } else {
        value.to_string()
    }
}

/// One pass over the wrapper layers.
fn peel(value: &str) -> &str {
    let value = strip_quotes(value).trim();
    let value = strip_prefix_ci(value, LEAD_IN_PHRASES).trim_start();
    value.trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c) || c.is_whitespace())
}

fn is_settled(value: &str) -> bool {
    peel(value) == value && strip_prefix_ci(value, CONNECTORS) == value
}

/// Remove one layer of matching surrounding quotes.
pub fn strip_quotes(text: &str) -> &str {
    for (open, close) in QUOTE_PAIRS {
        if let Some(inner) = text.strip_prefix(*open).and_then(|s| s.strip_suffix(*close)) {
            return inner;
        }
    }
    text
}

/// Strip the first matching prefix, ASCII case-insensitively.
pub(crate) fn strip_prefix_ci<'a>(text: &'a str, prefixes: &[&str]) -> &'a str {
    for prefix in prefixes {
        if let Some(head) = text.get(..prefix.len())
            && head.eq_ignore_ascii_case(prefix)
        {
            return &text[prefix.len()..];
        }
    }
    text
}
