//! Clap derive structures for the `vpnwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vpnwatch -- Checkpoint Gaia VPN user monitoring from the command line
#[derive(Debug, Parser)]
#[command(
    name = "vpnwatch",
    version,
    about = "Monitor Checkpoint Gaia VPN users from the command line",
    long_about = "Reads current and peak remote-access VPN user counts from a\n\
        Checkpoint Gaia gateway over SSH. Evaluates monitoring thresholds,\n\
        keeps a per-day CSV record, and mails chart-annotated reports.",
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
    /// Gateway profile to use
    #[arg(long, short = 'P', env = "VPNWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one row per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monitoring check: one status line, severity exit code
    #[command(alias = "c")]
    Check(CheckArgs),

    /// Collect a reading, append it to the daily record, mail the report
    #[command(alias = "rec")]
    Record(RecordArgs),

    /// Build the day's chart spreadsheet and mail it as an attachment
    Report(ReportArgs),

    /// Display a day's record on the console
    Show(ShowArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CHECK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Evaluates the current VPN user count against warning/critical levels
/// and prints a single plugin-format status line. The exit code is the
/// severity ordinal: 0 OK, 1 Warning, 2 Critical, 3 Unknown.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Hostname or IP address of the gateway
    #[arg(long = "hostname", short = 'H', env = "VPNWATCH_HOSTNAME")]
    pub hostname: String,

    /// Gaia user name
    #[arg(long, short = 'u', env = "VPNWATCH_USERNAME")]
    pub user: String,

    /// Gaia user password
    #[arg(long, short = 'p', env = "VPNWATCH_PASSWORD", hide_env = true)]
    pub password: String,

    /// Warning level for number of VPN users
    #[arg(long, short = 'w')]
    pub warning: u64,

    /// Critical level for number of VPN users (must exceed warning)
    #[arg(long, short = 'c')]
    pub critical: u64,

    /// SSH port
    #[arg(long, default_value = "22")]
    pub port: u16,

    /// Session timeout in seconds
    #[arg(long, env = "VPNWATCH_TIMEOUT", default_value = "10")]
    pub timeout: u64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RECORD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Directory holding the daily CSV records (default: current dir)
    #[arg(long, env = "VPNWATCH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Skip the emailed report even when mail is configured
    #[arg(long)]
    pub no_mail: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Directory holding the daily CSV records (default: current dir)
    #[arg(long, env = "VPNWATCH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Day to report on, YYYYMMDD (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Remove the day's CSV and spreadsheet after a successful send
    #[arg(long)]
    pub cleanup: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHOW
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Directory holding the daily CSV records (default: current dir)
    #[arg(long, env = "VPNWATCH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Day to display, YYYYMMDD (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    pub output: OutputFormat,
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Config key (e.g., "host", "warning", "mail.relay_host")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the Gaia (and relay) password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
