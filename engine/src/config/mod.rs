//! Configuration management
//!
//! Reads engine settings from `~/.mui-engine/config.json` (or an explicit
//! path) and applies environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::bootstrap::BootstrapOptions;
use crate::common::{EngineError, EngineResult};
use crate::manifest::SCHEMA_VERSION;

pub const ENV_BASE_URL: &str = "MUI_ENGINE_BASE_URL";
pub const ENV_TOKEN: &str = "MUI_ENGINE_TOKEN";
pub const ENV_TENANT: &str = "MUI_ENGINE_TENANT";

fn default_ttl_ms() -> u64 {
    60_000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub base_api_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
    #[serde(default = "default_schema_version")]
    pub expected_schema_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Path of the contract introspection endpoint, relative to `base_api_url`
    #[serde(default)]
    pub contract_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_api_url: None,
            access_token: None,
            tenant_id: None,
            ttl_ms: default_ttl_ms(),
            expected_schema_version: default_schema_version(),
            timeout_secs: default_timeout_secs(),
            contract_path: None,
        }
    }
}

/// `~/.mui-engine/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mui-engine").join("config.json"))
}

impl EngineConfig {
    /// Load from `path`, or the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn load_from(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config {:?}: {}", path, e)))?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config JSON: {}", e)))?;

        info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_api_url = Some(url);
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(tenant) = lookup(ENV_TENANT).filter(|v| !v.trim().is_empty()) {
            self.tenant_id = Some(tenant);
        }
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn require_base_url(&self) -> EngineResult<&str> {
        self.base_api_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "baseApiUrl is not configured (set it in the config file or {})",
                    ENV_BASE_URL
                ))
            })
    }

    /// Bootstrap options carrying this config's TTL
    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions::default().with_ttl(self.ttl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"baseApiUrl":"https://api.example.com"}"#).unwrap();
        assert_eq!(config.ttl_ms, 60_000);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.expected_schema_version, SCHEMA_VERSION);
        assert_eq!(config.require_base_url().unwrap(), "https://api.example.com");
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "https://override.example.com/"),
            (ENV_TOKEN, "secret"),
            (ENV_TENANT, ""),
        ]);
        let config = EngineConfig {
            tenant_id: Some("tenant-a".into()),
            ..EngineConfig::default()
        }
        .with_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.require_base_url().unwrap(), "https://override.example.com");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert_eq!(config.tenant_id.as_deref(), Some("tenant-a"));
    }

    #[test]
    fn test_missing_base_url_is_config_error() {
        let err = EngineConfig::default().require_base_url().unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_token_is_never_serialized() {
        let config = EngineConfig {
            access_token: Some("secret".into()),
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"ttlMs": 1000, "contractPath": "/auth/ui-engine/contract"}"#,
        )
        .unwrap();

        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.ttl(), Duration::from_millis(1000));
        assert_eq!(config.contract_path.as_deref(), Some("/auth/ui-engine/contract"));
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let err = EngineConfig::load(Some(Path::new("/nonexistent/mui-engine.json"))).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
