//! QR rendering limits from TOML (`[qr]` section)

use serde::{Deserialize, Serialize};

/// Byte-mode capacity of a version 40 symbol at error-correction level M.
pub const DEFAULT_QR_MAX_BYTES: usize = 2331;

/// Raw QR configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQrConfig {
    /// Longest payload accepted, in UTF-8 bytes. The encoder works in byte
    /// mode, so a CJK character costs three.
    pub max_bytes: usize,
}

impl Default for FileQrConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_QR_MAX_BYTES,
        }
    }
}
