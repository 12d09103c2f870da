//! Config subcommand handlers.

use dialoguer::{Confirm, Input};
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "API URL")]
    api_url: String,
    #[tabled(rename = "Default")]
    default: String,
}

#[derive(serde::Serialize)]
struct ProfileEntry {
    name: String,
    api_url: String,
    default: bool,
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn render_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Config(config::ConfigError::from(e)))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match global.format() {
                OutputFormat::Table | OutputFormat::Plain => render_toml(&cfg)?,
                format => output::render_single(format, &cfg, |_| String::new(), |_| String::new()),
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.default_profile_name().to_owned();
            let entries: Vec<ProfileEntry> = cfg
                .profiles
                .iter()
                .map(|(name, p)| ProfileEntry {
                    name: name.clone(),
                    api_url: p.api_url.clone(),
                    default: *name == default,
                })
                .collect();
            let out = output::render_list(
                global.format(),
                &entries,
                |e| ProfileRow {
                    name: e.name.clone(),
                    api_url: e.api_url.clone(),
                    default: if e.default { "*".into() } else { String::new() },
                },
                |e| e.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }

        ConfigCommand::Init => init(global),
    }
}

/// Interactive wizard: one profile, written to the canonical path.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("trattoria -- configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config()?;

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(cfg.default_profile_name().to_owned())
        .interact_text()
        .map_err(prompt_err)?;

    let existing = cfg.profiles.get(&profile_name).cloned().unwrap_or_default();

    let api_url: String = Input::new()
        .with_prompt("API base URL")
        .default(
            global
                .api_url
                .clone()
                .unwrap_or_else(|| existing.api_url.clone()),
        )
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input)
                .map_err(|e| e.to_string())
                .and_then(|u| {
                    if matches!(u.scheme(), "http" | "https") {
                        Ok(())
                    } else {
                        Err("expected an http(s) URL".into())
                    }
                })
        })
        .interact_text()
        .map_err(prompt_err)?;

    let page_size: u32 = Input::new()
        .with_prompt("Page size")
        .default(existing.page_size.unwrap_or(cfg.defaults.page_size))
        .interact_text()
        .map_err(prompt_err)?;

    let discard_stale_lists = Confirm::new()
        .with_prompt("Ignore list responses superseded by a newer request?")
        .default(existing.discard_stale_lists.unwrap_or(false))
        .interact()
        .map_err(prompt_err)?;

    let profile = Profile {
        api_url,
        page_size: Some(page_size),
        discard_stale_lists: Some(discard_stale_lists),
        ..existing
    };
    // Validate before writing anything.
    config::profile_to_console_config(&profile, &cfg.defaults)?;

    if cfg.profiles.is_empty() {
        cfg.default_profile = Some(profile_name.clone());
    }
    cfg.profiles.insert(profile_name.clone(), profile);

    let path = config::save_config(&cfg)?;
    output::success(
        global,
        &format!("Profile '{profile_name}' saved to {}", path.display()),
    );
    Ok(())
}
