//! Clap derive structures for the `rutxctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rutxctl -- provisioning CLI for Husarion robot routers
#[derive(Debug, Parser)]
#[command(
    name = "rutxctl",
    version,
    about = "Provision and manage Teltonika RUTX11 routers on Husarion robots",
    long_about = "Provision and manage the Teltonika RUTX11 router shipped with\n\
        Husarion robots: factory defaults, Wi-Fi uplinks, static leases,\n\
        and on-robot network setup over SSH.",
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
    /// Router address
    #[arg(
        long,
        short = 'd',
        env = "RUTX_DEVICE",
        default_value = "10.15.20.1",
        global = true
    )]
    pub device: String,

    /// API username (prompted when omitted)
    #[arg(long, short = 'u', env = "RUTX_USERNAME", global = true)]
    pub username: Option<String>,

    /// API password (prompted when omitted)
    #[arg(long, env = "RUTX_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "RUTX_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reset the router to the robot factory configuration
    #[command(name = "restore-defaults", alias = "restore")]
    RestoreDefaults(RestoreArgs),

    /// Manage Wi-Fi uplink networks
    #[command(alias = "w")]
    Wifi(WifiArgs),

    /// Manage static DHCP leases
    Lease(LeaseArgs),

    /// Reboot the router
    Reboot,

    /// Apply a local setup file over SSH (no web API needed)
    Setup(SetupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── restore-defaults ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Robot model the router is installed in
    #[arg(long, short = 'm', env = "ROBOT_MODEL")]
    pub model: String,

    /// Robot serial number (exactly four characters)
    #[arg(long, short = 's')]
    pub serial: String,
}

// ── wifi ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WifiArgs {
    #[command(subcommand)]
    pub command: WifiCommand,
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// Add (or update) an uplink network and wait for connectivity
    Connect {
        /// Network SSID
        ssid: String,

        /// Network password (prompted when omitted)
        #[arg(long, short = 'p')]
        password: Option<String>,

        /// Do not wait for internet connectivity afterwards
        #[arg(long)]
        no_wait: bool,
    },

    /// Remove an uplink network by SSID
    Disconnect {
        /// Network SSID
        ssid: String,
    },

    /// List configured uplink networks
    #[command(alias = "ls")]
    List,
}

// ── lease ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LeaseArgs {
    #[command(subcommand)]
    pub command: LeaseCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeaseCommand {
    /// Add a static DHCP lease
    Add {
        /// IPv4 address to pin
        #[arg(long)]
        ip: String,

        /// Client MAC address (aa:bb:cc:dd:ee:ff)
        #[arg(long)]
        mac: String,

        /// Hostname label for the lease
        #[arg(long)]
        name: String,
    },

    /// List static DHCP leases
    #[command(alias = "ls")]
    List,

    /// Delete all static leases, optionally asserting one
    Reset {
        /// IPv4 address to assert after the wipe
        #[arg(long, requires = "mac", requires = "name")]
        ip: Option<String>,

        /// Client MAC address to assert
        #[arg(long)]
        mac: Option<String>,

        /// Hostname label to assert
        #[arg(long)]
        name: Option<String>,
    },
}

// ── setup ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Path to the JSON setup file
    #[arg(long, short = 'c', default_value = "config.json")]
    pub config: PathBuf,

    /// SSH user on the router
    #[arg(long, default_value = "root")]
    pub user: String,

    /// Do not wait for internet connectivity afterwards
    #[arg(long)]
    pub no_wait: bool,
}

// ── completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
