//! CLI configuration -- thin wrapper around `trattoria_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --api-url, --timeout).

use trattoria_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use trattoria_config::{
    Config, ConfigError, Profile, config_path, load_config, load_config_or_default,
    profile_to_console_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// Translate the active profile + global flags into a `ConsoleConfig`.
///
/// Flag overrides take priority over profile values.
pub fn build_console_config(global: &GlobalOpts, cfg: &Config) -> Result<ConsoleConfig, CliError> {
    let name = active_profile_name(global, cfg);
    let (_, mut profile) = match cfg.resolve_profile(Some(&name)) {
        Ok(found) => found,
        // A bare --api-url needs no profile at all.
        Err(ConfigError::UnknownProfile { .. }) if global.api_url.is_some() => {
            (name.clone(), Profile::default())
        }
        Err(ConfigError::UnknownProfile { profile }) => {
            return Err(CliError::ProfileNotFound {
                name: profile,
                available: available_profiles(cfg),
            });
        }
        Err(other) => return Err(other.into()),
    };

    if let Some(url) = &global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    let console = profile_to_console_config(&profile, &cfg.defaults)?;
    tracing::debug!(
        profile = %name,
        api_url = %console.api_url,
        timeout = ?console.timeout,
        "resolved console config"
    );
    Ok(console)
}

/// Comma-separated profile names, or a placeholder when there are none.
pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Page size for list commands: flag, else the console's configured size.
pub fn page_size(flag: Option<u32>, console: &ConsoleConfig) -> u32 {
    flag.filter(|s| *s > 0).unwrap_or(console.page_size)
}
