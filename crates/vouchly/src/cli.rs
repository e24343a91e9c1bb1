//! Clap derive structures for the `vouchly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vouchly -- kubectl-style CLI for voucher campaigns
#[derive(Debug, Parser)]
#[command(
    name = "vouchly",
    version,
    about = "Manage voucher campaigns from the command line",
    long_about = "Create discount campaigns, bulk-generate their voucher codes,\n\
        page through vouchers and export them as CSV.\n\n\
        Talks to the campaign HTTP API under <api-url>/api.",
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
    /// Config profile to use
    #[arg(long, short = 'p', env = "VOUCHLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API origin, e.g. http://localhost:3000 (overrides profile)
    #[arg(long, short = 'u', env = "VOUCHLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VOUCHLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "VOUCHLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout unless set)
    #[arg(long, env = "VOUCHLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

#[derive(Debug, Clone, ValueEnum)]
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
    /// Manage voucher campaigns
    #[command(alias = "camp", alias = "c")]
    Campaigns(CampaignsArgs),

    /// List, generate and export a campaign's vouchers
    #[command(alias = "v")]
    Vouchers(VouchersArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Page Arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Items per page (defaults to the profile's page size)
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CAMPAIGNS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CampaignsArgs {
    #[command(subcommand)]
    pub command: CampaignsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CampaignsCommand {
    /// List campaigns
    #[command(alias = "ls")]
    List(PageArgs),

    /// Show one campaign
    Get {
        /// Campaign ID
        id: String,
    },

    /// Create a campaign (unset fields take the form defaults)
    Create(CreateCampaignArgs),

    /// Delete a campaign and all of its vouchers
    #[command(alias = "rm")]
    Delete {
        /// Campaign ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateCampaignArgs {
    /// Campaign name [default: "Campaign 1"]
    #[arg(long)]
    pub name: Option<String>,

    /// Voucher code prefix, at most 50 characters [default: DISCOUNT]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Voucher value [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Option<f64>,

    /// Currency code: SEK, USD, EUR, GBP, CAD or AUD [default: EUR]
    #[arg(long)]
    pub currency: Option<String>,

    /// First valid day, YYYY-MM-DD [default: 2025-01-01]
    #[arg(long)]
    pub valid_from: Option<String>,

    /// Last valid day, YYYY-MM-DD; must be after --valid-from [default: 2026-01-01]
    #[arg(long)]
    pub valid_to: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VOUCHERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VouchersArgs {
    #[command(subcommand)]
    pub command: VouchersCommand,
}

#[derive(Debug, Subcommand)]
pub enum VouchersCommand {
    /// List a campaign's vouchers, one page at a time
    #[command(alias = "ls")]
    List {
        /// Campaign ID
        campaign_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Bulk-generate vouchers for a campaign
    #[command(alias = "gen")]
    Generate {
        /// Campaign ID
        campaign_id: String,

        /// Number of vouchers to generate (1-100000)
        #[arg(long, short = 'n', default_value = "100000")]
        count: u64,
    },

    /// Export a campaign's vouchers as CSV
    #[command(alias = "dl")]
    Download {
        /// Campaign ID
        campaign_id: String,

        /// Directory to save into (defaults to the profile's download_dir)
        #[arg(long, short = 'd')]
        dir: Option<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile in the config file
    ///
    /// The profile's API origin comes from the global --api-url flag and
    /// is prompted for when omitted.
    Init {
        /// Make this profile the default
        #[arg(long)]
        default: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Set a key on the active profile
    Set {
        /// Key: api_url, insecure, timeout, ca_cert, download_dir,
        /// campaign_page_size or voucher_page_size
        key: String,
        /// Value
        value: String,
    },

    /// List configured profiles (* marks the default)
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
