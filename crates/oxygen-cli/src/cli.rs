//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use oxygen_domain::{CircleVisibility, PayoutOrdering};
use oxygen_gatekeeper::{MarketplaceFilter, MarketplaceSort};
use std::path::PathBuf;

/// Oxygen CLI - Walk the savings circle app and query its eligibility rules.
#[derive(Debug, Parser)]
#[command(name = "oxygen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// JSON fixture file to load instead of the bundled demo data
    #[arg(long, global = true, env = "OXYGEN_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Trust score to use instead of the fixture's
    #[arg(
        short,
        long,
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub trust_score: Option<u8>,

    /// Navigator TOML file
    #[arg(long, global = true, env = "OXYGEN_NAVIGATOR_CONFIG")]
    pub navigator: Option<PathBuf>,

    /// Shorten loading and payment timers
    #[arg(long, global = true)]
    pub fast: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter interactive REPL mode
    Repl,

    /// Print every eligibility rule for the trust score
    Eligibility(EligibilityArgs),

    /// List marketplace circles with join decisions
    Marketplace(MarketplaceArgs),

    /// Classify a heat score
    Heat(HeatArgs),

    /// Validate a circle you would coordinate
    Pledge(PledgeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

/// Arguments for the eligibility command.
#[derive(Debug, Parser)]
pub struct EligibilityArgs {
    /// Active clusters to assume instead of the fixture's memberships
    #[arg(short, long)]
    pub active: Option<usize>,
}

/// Arguments for the marketplace command.
#[derive(Debug, Parser)]
pub struct MarketplaceArgs {
    /// Case-insensitive text matched against name, coordinator and slogan
    #[arg(short, long)]
    pub search: Option<String>,

    /// Listing filter
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Listing order
    #[arg(long, value_enum, default_value = "newest")]
    pub sort: SortArg,

    /// Active clusters to assume instead of the fixture's memberships
    #[arg(short, long)]
    pub active: Option<usize>,
}

/// Arguments for the heat command.
#[derive(Debug, Parser)]
pub struct HeatArgs {
    /// Heat score (0-100)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: u8,
}

/// Arguments for the pledge command.
#[derive(Debug, Parser)]
pub struct PledgeArgs {
    /// Circle name
    #[arg(long, default_value = "")]
    pub alias: String,

    /// Motto
    #[arg(long, default_value = "")]
    pub slogan: String,

    /// Naira per member per day
    #[arg(long, default_value = "50")]
    pub amount: u64,

    /// Days in one cycle
    #[arg(long, default_value = "7")]
    pub cycle: u32,

    /// Member capacity
    #[arg(long, default_value = "10")]
    pub members: u32,

    /// Payout ordering
    #[arg(long, value_enum, default_value = "random")]
    pub payout: PayoutArg,

    /// Mood tag (repeat for more)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Who can discover the circle
    #[arg(long, value_enum, default_value = "public")]
    pub visibility: VisibilityArg,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,

    /// Persist a trust score override
    SetTrustScore {
        /// Trust score (0-100)
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,
    },

    /// Remove the trust score override
    ClearTrustScore,

    /// Restore the default configuration
    Reset,
}

/// Marketplace filter argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FilterArg {
    /// Every circle
    All,
    /// Circles you can join now
    Available,
    /// Coordinators with a high trust score
    HighTrust,
    /// Low heat circles
    LowRisk,
    /// Short cycles
    Fast,
}

/// Marketplace sort argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SortArg {
    /// Listing order
    Newest,
    /// Largest contribution first
    AmountHigh,
    /// Smallest contribution first
    AmountLow,
    /// Shortest cycle first
    Duration,
    /// Most trusted coordinator first
    Trust,
    /// Coolest circle first
    Heat,
}

/// Payout ordering argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PayoutArg {
    /// Lottery order
    Random,
    /// Order of joining
    FirstJoin,
    /// Coordinator decides
    Manual,
}

/// Visibility argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VisibilityArg {
    /// Listed in the marketplace
    Public,
    /// Joinable by invitation only
    Invite,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<FilterArg> for MarketplaceFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => MarketplaceFilter::All,
            FilterArg::Available => MarketplaceFilter::Available,
            FilterArg::HighTrust => MarketplaceFilter::HighTrust,
            FilterArg::LowRisk => MarketplaceFilter::LowRisk,
            FilterArg::Fast => MarketplaceFilter::Fast,
        }
    }
}

impl From<SortArg> for MarketplaceSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Newest => MarketplaceSort::Newest,
            SortArg::AmountHigh => MarketplaceSort::AmountHigh,
            SortArg::AmountLow => MarketplaceSort::AmountLow,
            SortArg::Duration => MarketplaceSort::Duration,
            SortArg::Trust => MarketplaceSort::Trust,
            SortArg::Heat => MarketplaceSort::Heat,
        }
    }
}

impl From<PayoutArg> for PayoutOrdering {
    fn from(payout: PayoutArg) -> Self {
        match payout {
            PayoutArg::Random => PayoutOrdering::Random,
            PayoutArg::FirstJoin => PayoutOrdering::FirstJoin,
            PayoutArg::Manual => PayoutOrdering::Manual,
        }
    }
}

impl From<VisibilityArg> for CircleVisibility {
    fn from(visibility: VisibilityArg) -> Self {
        match visibility {
            VisibilityArg::Public => CircleVisibility::Public,
            VisibilityArg::Invite => CircleVisibility::Invite,
        }
    }
}
