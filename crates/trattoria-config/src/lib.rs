//! Shared configuration for the trattoria console.
//!
//! TOML profiles merged with `TRATTORIA_`-prefixed environment variables,
//! and translation to `trattoria_core::ConsoleConfig`. The CLI layers its
//! own flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trattoria_core::ConsoleConfig;
use trattoria_core::config::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};

pub const DEFAULT_PROFILE: &str = "default";
pub const ENV_PREFIX: &str = "TRATTORIA_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Versioned API base URL (e.g., "http://localhost:8080/api/v1").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Override the default timeout (seconds).
    pub timeout: Option<u64>,

    /// Override the default page size.
    pub page_size: Option<u32>,

    /// Drop list responses superseded by a newer list request.
    pub discard_stale_lists: Option<bool>,

    pub user_agent: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: None,
            page_size: None,
            discard_stale_lists: None,
            user_agent: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Config {
    /// Name of the profile to use when none is requested explicitly.
    pub fn default_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    /// Look up `name` (or the default profile).
    ///
    /// The default profile need not exist in the file: it falls back to
    /// a local backend so the console runs without any configuration.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = name.unwrap_or_else(|| self.default_profile_name());
        match self.profiles.get(name) {
            Some(profile) => Ok((name.to_owned(), profile.clone())),
            None if name == self.default_profile_name() => {
                Ok((name.to_owned(), Profile::default()))
            }
            None => Err(ConfigError::UnknownProfile {
                profile: name.to_owned(),
            }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "trattoria", "trattoria").map_or_else(
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
    p.push("trattoria");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file, then `TRATTORIA_*` env vars.
///
/// Nested keys use a double underscore:
/// `TRATTORIA_DEFAULTS__TIMEOUT=5`, `TRATTORIA_PROFILES__PROD__API_URL=...`.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file (missing files contribute nothing).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ConsoleConfig` from a profile and the global defaults.
pub fn profile_to_console_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ConsoleConfig, ConfigError> {
    let api_url: url::Url = profile
        .api_url
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("{e}: {}", profile.api_url),
        })?;
    if !matches!(api_url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected an http(s) URL, got '{}'", profile.api_url),
        });
    }

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let page_size = profile.page_size.unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be at least 1".into(),
        });
    }

    let base = ConsoleConfig::default();
    Ok(ConsoleConfig {
        api_url,
        timeout: Duration::from_secs(timeout),
        user_agent: profile.user_agent.clone(),
        page_size,
        discard_stale_lists: profile
            .discard_stale_lists
            .unwrap_or(base.discard_stale_lists),
        ..base
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "staging"

[defaults]
output = "json"
timeout = 12

[profiles.staging]
api_url = "https://staging.example.com/api/v1"
page_size = 50
discard_stale_lists = true

[profiles.local]
api_url = "http://localhost:8080/api/v1"
"#;

    fn write_sample() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_profiles_and_defaults() {
        let (_dir, path) = write_sample();
        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.default_profile_name(), "staging");
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 12);
        assert_eq!(cfg.defaults.page_size, 20);
        assert_eq!(cfg.profiles.len(), 2);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile_name(), DEFAULT_PROFILE);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profile_overrides_defaults() {
        let (_dir, path) = write_sample();
        let cfg = load_config_from(&path).unwrap();
        let (name, profile) = cfg.resolve_profile(None).unwrap();
        assert_eq!(name, "staging");

        let console = profile_to_console_config(&profile, &cfg.defaults).unwrap();
        assert_eq!(console.api_url.host_str(), Some("staging.example.com"));
        assert_eq!(console.timeout, Duration::from_secs(12));
        assert_eq!(console.page_size, 50);
        assert!(console.discard_stale_lists);
    }

    #[test]
    fn default_profile_may_be_implicit() {
        let cfg = Config::default();
        let (name, profile) = cfg.resolve_profile(None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = Config::default().resolve_profile(Some("prod")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { profile } if profile == "prod"));
    }

    #[test]
    fn rejects_non_http_urls_and_zero_values() {
        let defaults = Defaults::default();
        let bad_url = Profile {
            api_url: "ftp://menu.example.com".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_console_config(&bad_url, &defaults),
            Err(ConfigError::Validation { field, .. }) if field == "api_url"
        ));

        let zero = Profile {
            timeout: Some(0),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_console_config(&zero, &defaults),
            Err(ConfigError::Validation { field, .. }) if field == "timeout"
        ));
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api_url: "http://10.0.0.5:8080/api/v1".into(),
                page_size: Some(30),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, cfg.profiles);
    }
}
