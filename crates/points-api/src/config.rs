//! Service Configuration

use serde::{Deserialize, Serialize};

/// Process-wide configuration, resolved once at startup and passed into the
/// state explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Default credential lifetime when the request omits one
    pub default_key_ttl_days: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            default_key_ttl_days: 30,
        }
    }
}

impl ApiConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
