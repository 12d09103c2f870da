//! Clap derive structures for the `trattoria` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use trattoria_config::Defaults;
use trattoria_core::MenuCategory;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// trattoria -- back office for the restaurant API
#[derive(Debug, Parser)]
#[command(
    name = "trattoria",
    version,
    about = "Manage restaurant customers and the menu from the command line",
    long_about = "Back-office console for the trattoria restaurant API.\n\n\
        Every command issues one request through a local state store and\n\
        renders the settled collection, entity, or error.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TRATTORIA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile), e.g. http://localhost:8080/api/v1
    #[arg(long, env = "TRATTORIA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "TRATTORIA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TRATTORIA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Fill unset output/color flags from the config file defaults.
    pub fn apply_defaults(&mut self, defaults: &Defaults) {
        if self.output.is_none() {
            self.output = OutputFormat::from_str(&defaults.output, true).ok();
        }
        if self.color.is_none() {
            self.color = ColorMode::from_str(&defaults.color, true).ok();
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage customers
    #[command(alias = "cust", alias = "c")]
    Customers(CustomersArgs),

    /// Manage menu items
    #[command(alias = "m")]
    Menu(MenuArgs),

    /// Show headline counts for customers and the menu
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Zero-based page index
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Page size (defaults to the profile's page_size)
    #[arg(long, short = 'l')]
    pub size: Option<u32>,
}

// ── Customers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one customer
    Get { id: String },

    /// Look up a customer by e-mail address
    #[command(name = "by-email")]
    ByEmail { email: String },

    /// Search customers by name
    Search { query: String },

    /// Create a customer
    Create(CustomerFields),

    /// Replace a customer's details
    Update {
        id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },

    /// Delete a customer
    #[command(alias = "rm")]
    Delete { id: String },

    /// Mark a customer active
    Activate { id: String },

    /// Mark a customer inactive
    Deactivate { id: String },
}

#[derive(Debug, Args)]
pub struct CustomerFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

// ── Menu ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MenuArgs {
    #[command(subcommand)]
    pub command: MenuCommand,
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// List menu items
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one menu item
    Get { id: String },

    /// Search menu items by name
    Search { query: String },

    /// List items in one category
    Category {
        #[arg(value_parser = parse_category)]
        category: MenuCategory,
    },

    /// List items currently available
    Available,

    /// Create a menu item
    Create(MenuItemFields),

    /// Replace a menu item's details
    Update {
        id: String,
        #[command(flatten)]
        fields: MenuItemFields,

        /// Whether the item can be ordered
        #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
        available: bool,
    },

    /// Delete a menu item
    #[command(alias = "rm")]
    Delete { id: String },

    /// Make an item orderable
    MakeAvailable { id: String },

    /// Take an item off the menu without deleting it
    MakeUnavailable { id: String },

    /// List menu categories
    Categories,
}

#[derive(Debug, Args)]
pub struct MenuItemFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Price amount, e.g. 12.50
    #[arg(long)]
    pub price: f64,

    #[arg(long, default_value = "EUR")]
    pub currency: String,

    #[arg(long, value_parser = parse_category)]
    pub category: MenuCategory,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Preparation time in minutes
    #[arg(long, default_value = "15")]
    pub prep_time: u32,
}

fn parse_category(s: &str) -> Result<MenuCategory, String> {
    let normalized = s.replace('-', "_");
    normalized.parse().map_err(|_| {
        let all: Vec<String> = MenuCategory::all().iter().map(ToString::to_string).collect();
        format!("unknown category '{s}' (expected one of: {})", all.join(", "))
    })
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use { name: String },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
