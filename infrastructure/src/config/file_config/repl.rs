//! `[repl]` section: interactive session behavior

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Spinner on stderr while a tool call is in flight. `--quiet` also
    /// suppresses it.
    pub show_progress: bool,
    /// Line history file. A leading `~/` expands to the home directory;
    /// unset means `<data dir>/toolrouter/history.txt`.
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    pub fn progress_enabled(&self, quiet: bool) -> bool {
        self.show_progress && !quiet
    }

    /// Configured history path with `~/` expanded.
    pub fn history_path(&self) -> Option<PathBuf> {
        let raw = self.history_file.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_disables_progress() {
        let repl = FileReplConfig::default();
        assert!(repl.progress_enabled(false));
        assert!(!repl.progress_enabled(true));
    }

    #[test]
    fn test_history_path() {
        let mut repl = FileReplConfig::default();
        assert_eq!(repl.history_path(), None);

        repl.history_file = Some("/tmp/toolrouter-history".to_string());
        assert_eq!(repl.history_path(), Some(PathBuf::from("/tmp/toolrouter-history")));

        repl.history_file = Some("   ".to_string());
        assert_eq!(repl.history_path(), None);

        repl.history_file = Some("~/.toolrouter_history".to_string());
        if let Some(home) = dirs::home_dir() {
            assert_eq!(repl.history_path(), Some(home.join(".toolrouter_history")));
        }
    }
}
