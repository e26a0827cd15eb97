//! JSONL file writer for tool-call results.
//!
//! Each [`ToolCallResult`] is serialized as a single JSON line with a
//! `type` field and a `logged_at` timestamp, appended through a buffered
//! writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toolrouter_application::ports::tool_call_logger::ToolCallLogger;
use toolrouter_domain::ToolCallResult;
use tracing::warn;

/// JSONL result logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Existing files are appended
/// to, so one log can span many sessions. Flushes on `Drop`.
pub struct JsonlToolCallLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlToolCallLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create result log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open result log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolCallLogger for JsonlToolCallLogger {
    fn log(&self, result: &ToolCallResult) {
        let logged_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match serde_json::to_value(result) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert(
                    "type".to_string(),
                    serde_json::Value::String("tool_call".to_string()),
                );
                map.insert("logged_at".to_string(), serde_json::Value::String(logged_at));
                serde_json::Value::Object(map)
            }
            Ok(other) => serde_json::json!({
                "type": "tool_call",
                "logged_at": logged_at,
                "data": other,
            }),
            Err(e) => {
                warn!("Could not serialize tool call result {}: {}", result.id, e);
                return;
            }
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each record so a crash loses nothing
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlToolCallLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
