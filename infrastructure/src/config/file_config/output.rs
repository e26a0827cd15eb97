//! `[output]` section: how results are rendered on the console

use serde::{Deserialize, Serialize};
use toolrouter_domain::OutputFormat;

/// Result rendering settings.
///
/// Both fields lose to their command-line counterparts (`--output`,
/// `--no-color`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `text` prints only the tool output, `full` adds the envelope
    /// (tool, timing, metadata), `json` prints the serialized result
    pub format: Option<OutputFormat>,
    /// ANSI colors for headers, score bars and success/failure markers
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Format for this run: the CLI flag, then this section, then `text`.
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }

    /// Colors stay on unless either the flag or the file turns them off.
    pub fn color_enabled(&self, no_color_flag: bool) -> bool {
        self.color && !no_color_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_color_from_toml() {
        let toml_str = r#"
[output]
format = "json"
color = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color_enabled(false));
    }

    #[test]
    fn test_cli_format_wins() {
        let output = FileOutputConfig {
            format: Some(OutputFormat::Json),
            color: true,
        };
        assert_eq!(output.resolve_format(Some(OutputFormat::Full)), OutputFormat::Full);
        assert_eq!(output.resolve_format(None), OutputFormat::Json);
        assert_eq!(FileOutputConfig::default().resolve_format(None), OutputFormat::Text);
    }

    #[test]
    fn test_no_color_flag_wins() {
        assert!(FileOutputConfig::default().color_enabled(false));
        assert!(!FileOutputConfig::default().color_enabled(true));
    }
}
