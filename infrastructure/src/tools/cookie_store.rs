//! Per-host session cookie store shared by login calls.
//!
//! Cookies are kept for the life of the process only. Storing for a host
//! replaces whatever that host had before (last write wins).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct CookieStore {
    hosts: Mutex<HashMap<String, Vec<(String, String)>>>,
}

impl CookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<(String, String)>>> {
        self.hosts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the cookies held for `host`. An empty list is ignored.
    pub fn store(&self, host: &str, cookies: Vec<(String, String)>) {
        if cookies.is_empty() {
            return;
        }
        self.lock().insert(host.to_string(), cookies);
    }

    pub fn cookies(&self, host: &str) -> Vec<(String, String)> {
        self.lock().get(host).cloned().unwrap_or_default()
    }

    /// `Cookie` header value for `host`, if any cookies are held.
    pub fn header_for(&self, host: &str) -> Option<String> {
        let cookies = self.cookies(host);
        (!cookies.is_empty()).then(|| {
            cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; ")
        })
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Name and value from a `Set-Cookie` header, attributes dropped.
pub fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_header_for_joins_cookies() {
        let store = CookieStore::new();
        assert!(store.header_for("example.com").is_none());

        store.store("example.com", vec![pair("SID", "abc"), pair("lang", "en")]);
        assert_eq!(store.header_for("example.com").as_deref(), Some("SID=abc; lang=en"));
        assert!(store.header_for("other.com").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let store = CookieStore::new();
        store.store("example.com", vec![pair("SID", "old"), pair("lang", "en")]);
        store.store("example.com", vec![pair("SID", "new")]);
        assert_eq!(store.cookies("example.com"), vec![pair("SID", "new")]);
    }

    #[test]
    fn test_empty_store_keeps_previous() {
        let store = CookieStore::new();
        store.store("example.com", vec![pair("SID", "abc")]);
        store.store("example.com", Vec::new());
        assert_eq!(store.header_for("example.com").as_deref(), Some("SID=abc"));

        store.clear();
        assert!(store.cookies("example.com").is_empty());
    }

    #[test]
    fn test_parse_set_cookie() {
        assert_eq!(
            parse_set_cookie("SID=abc123; Path=/; HttpOnly"),
            Some(pair("SID", "abc123"))
        );
        assert_eq!(parse_set_cookie("token="), Some(pair("token", "")));
        assert_eq!(parse_set_cookie("garbage"), None);
        assert_eq!(parse_set_cookie("=value"), None);
    }
}
