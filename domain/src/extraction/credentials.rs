//! Login credential parsing.
//!
//! Generic form: `key=value`, `key: value` or `key is value`, with a small
//! set of bilingual key aliases per field. The compact idiom
//! `user and pwd is U,P` is matched as a whole and always wins for both
//! username and password, since the generic `pwd is ...` rule would
//! otherwise capture only the part before the comma.

use regex::Regex;
use std::sync::LazyLock;

const USERNAME_KEYS: &[&str] = &["username", "user name", "user", "login", "account", "用户名", "账号", "用户"];
const PASSWORD_KEYS: &[&str] = &["password", "passwd", "pwd", "pass", "密码"];
const DOMAIN_KEYS: &[&str] = &["domain", "域名", "域"];
const SITE_KEYS: &[&str] = &["siteaddress", "site address", "site", "server", "url", "站点", "网址", "地址"];
const AUTH_TYPE_KEYS: &[&str] = &[
    "authenticationtype",
    "authentication type",
    "authtype",
    "auth type",
    "auth",
    "认证方式",
    "认证类型",
];

static COMPACT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:user|username)\s+(?:and|&)\s+(?:pwd|password|pass)\s+(?:is|are|=|:)\s*([^\s,，]+)\s*[,，]\s*([^\s,，;；]+)",
    )
    .expect("valid compact credential regex")
});

static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| key_value_pattern(USERNAME_KEYS));
static PASSWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| key_value_pattern(PASSWORD_KEYS));
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| key_value_pattern(DOMAIN_KEYS));
static SITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| key_value_pattern(SITE_KEYS));
static AUTH_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| key_value_pattern(AUTH_TYPE_KEYS));

fn key_value_pattern(keys: &[&str]) -> Regex {
    let alternatives = keys
        .iter()
        .map(|k| regex::escape(k).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)(?:^|[^a-z0-9_])(?:{alternatives})\s*(?:=|:|：|\s+is\s+|\s*是\s*|\s*为\s*)\s*([^\s,，;；]+)"
    ))
    .expect("valid key/value regex")
}

/// Credential fields found in free text; absent fields are `None`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ParsedCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub domain: Option<String>,
    pub site: Option<String>,
    pub auth_type: Option<String>,
}

impl std::fmt::Debug for ParsedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("domain", &self.domain)
            .field("site", &self.site)
            .field("auth_type", &self.auth_type)
            .finish()
    }
}

/// Parse whatever credential fields the input mentions.
pub fn parse_credentials(input: &str) -> ParsedCredentials {
    let mut parsed = ParsedCredentials {
        username: find_value(&USERNAME_PATTERN, input),
        password: find_value(&PASSWORD_PATTERN, input),
        domain: find_value(&DOMAIN_PATTERN, input),
        site: find_value(&SITE_PATTERN, input).map(|s| s.trim_end_matches('/').to_string()),
        auth_type: find_value(&AUTH_TYPE_PATTERN, input),
    };

    if let Some(caps) = COMPACT_PATTERN.captures(input) {
        parsed.username = Some(clean_value(&caps[1]));
        parsed.password = Some(clean_value(&caps[2]));
    }

    parsed
}

/// Whether the input uses the compact `user and pwd is U,P` idiom.
pub fn has_compact_credentials(input: &str) -> bool {
    COMPACT_PATTERN.is_match(input)
}

/// Number of distinct credential fields given in key/value form.
pub fn keyed_field_count(input: &str) -> usize {
    [
        &*USERNAME_PATTERN,
        &*PASSWORD_PATTERN,
        &*DOMAIN_PATTERN,
        &*SITE_PATTERN,
        &*AUTH_TYPE_PATTERN,
    ]
    .into_iter()
    .filter(|pattern| find_value(pattern, input).is_some())
    .count()
}

fn find_value(pattern: &Regex, input: &str) -> Option<String> {
    pattern
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| clean_value(m.as_str()))
        .filter(|v| !v.is_empty())
}

fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches(['"', '\''])
        .trim_end_matches(['.', '。'])
        .to_string()
}
