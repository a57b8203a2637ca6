//! Configuration for the weconnect-mcp server.
//!
//! TOML file (XDG config path) merged with `WECONNECT_`-prefixed
//! environment variables, plus env-based secret resolution for the
//! bridge token and the server API key.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Seconds a garage snapshot stays fresh.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Run against the built-in demo fleet instead of a bridge.
    #[serde(default)]
    pub demo: bool,

    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            demo: false,
            bridge: BridgeConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on every request except `/health`
    /// (plaintext; prefer `api_key_env`).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: None,
            api_key_env: None,
        }
    }
}

/// Upstream car-connectivity bridge.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Bridge base URL (e.g., "http://localhost:4000").
    pub url: Option<String>,

    /// Bearer token for the bridge (plaintext; prefer `token_env`).
    pub token: Option<String>,

    /// Environment variable name containing the bridge token.
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Tracing filter directive (e.g., "info", "weconnect_core=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Additional log file path. Logs always go to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8774
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("de", "weconnect", "weconnect-mcp").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("weconnect-mcp");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load configuration from an explicit file path, the canonical path
/// otherwise, with `WECONNECT_*` environment variables on top.
///
/// Environment keys use `__` as the section separator:
/// `WECONNECT_SERVER__PORT=9000` sets `server.port`.
///
/// The result is not yet validated: callers apply their own overrides
/// (CLI flags) first, then run [`Config::validate`].
pub fn load_config(file: Option<&PathBuf>) -> Result<Config, ConfigError> {
    let path = file.cloned().unwrap_or_else(config_path);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("WECONNECT_").split("__"));

    Ok(figment.extract::<Config>()?)
}

impl Config {
    /// Cross-field checks figment can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.demo {
            match self.bridge.url.as_deref() {
                None => {
                    return Err(ConfigError::Validation {
                        field: "bridge.url".into(),
                        reason: "required unless demo mode is enabled".into(),
                    });
                }
                Some(raw) => {
                    raw.parse::<url::Url>()
                        .map_err(|e| ConfigError::Validation {
                            field: "bridge.url".into(),
                            reason: format!("invalid URL: {e}"),
                        })?;
                }
            }
        }
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Validation {
                field: "cache_ttl_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Resolve the server API key: named env var first, then the
    /// plaintext config value. `None` disables authentication.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        resolve_secret(
            self.server.api_key_env.as_deref(),
            self.server.api_key.as_deref(),
        )
    }

    /// Resolve the bridge bearer token the same way.
    pub fn resolve_bridge_token(&self) -> Option<SecretString> {
        resolve_secret(self.bridge.token_env.as_deref(), self.bridge.token.as_deref())
    }
}

fn resolve_secret(env_name: Option<&str>, plaintext: Option<&str>) -> Option<SecretString> {
    if let Some(name) = env_name {
        if let Ok(value) = std::env::var(name) {
            return Some(SecretString::from(value));
        }
    }
    plaintext.map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_require_a_bridge_url() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config(None).unwrap();
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "bridge.url"));
            Ok(())
        });
    }

    #[test]
    fn file_values_load_and_env_overrides_win() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "weconnect.toml",
                r#"
                    cache_ttl_secs = 120

                    [server]
                    port = 9000

                    [bridge]
                    url = "http://localhost:4000"
                "#,
            )?;
            jail.set_env("WECONNECT_SERVER__PORT", "9100");

            let config = load_config(Some(&PathBuf::from("weconnect.toml"))).unwrap();
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.cache_ttl(), Duration::from_secs(120));
            assert_eq!(config.bridge.url.as_deref(), Some("http://localhost:4000"));
            Ok(())
        });
    }

    #[test]
    fn demo_mode_needs_no_bridge() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WECONNECT_DEMO", "true");
            let config = load_config(None).unwrap();
            config.validate().unwrap();
            assert!(config.demo);
            assert!(config.resolve_api_key().is_none());
            Ok(())
        });
    }

    #[test]
    fn secrets_prefer_the_named_env_var() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "weconnect.toml",
                r#"
                    demo = true

                    [server]
                    api_key = "from-file"
                    api_key_env = "WECONNECT_TEST_KEY"
                "#,
            )?;

            let config = load_config(Some(&PathBuf::from("weconnect.toml"))).unwrap();
            assert_eq!(
                config.resolve_api_key().unwrap().expose_secret(),
                "from-file"
            );

            jail.set_env("WECONNECT_TEST_KEY", "from-env");
            let config = load_config(Some(&PathBuf::from("weconnect.toml"))).unwrap();
            assert_eq!(
                config.resolve_api_key().unwrap().expose_secret(),
                "from-env"
            );
            Ok(())
        });
    }

    #[test]
    fn zero_ttl_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WECONNECT_DEMO", "true");
            jail.set_env("WECONNECT_CACHE_TTL_SECS", "0");
            let err = load_config(None).and_then(|c| c.validate().map(|()| c)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation { ref field, .. } if field == "cache_ttl_secs")
            );
            Ok(())
        });
    }
}
