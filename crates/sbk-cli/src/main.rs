//! `sbk` entry point.
//!
//! Thin: loads `.env.local`, sets up tracing on stderr, parses arguments and
//! hands off to `commands`. Reports go to stdout as pretty JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sbk")]
#[command(about = "Spreadbook FIFO PnL reports", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Commands,
}

/// Flags shared by every report command.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// JSON array of export rows
    #[arg(long, global = true, env = "SBK_ORDERS")]
    pub orders: Option<PathBuf>,

    /// Layered config paths in merge order (repeatable)
    #[arg(long = "config", global = true)]
    pub config_paths: Vec<String>,

    /// Wall-clock "now" as `YYYY-MM-DD HH:MM:SS` in the report timezone
    #[arg(long, global = true)]
    pub now: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily buy/sell totals and realized revenue
    Daily,

    /// Month-of-year revenue and spread
    Monthly {
        /// weighted | unweighted (overrides report.spread_mode)
        #[arg(long)]
        spread_mode: Option<String>,
    },

    /// Average holding time of matched inventory, in minutes
    Velocity {
        /// 7d | 30d | 90d (overrides report.velocity_window)
        #[arg(long)]
        window: Option<String>,
    },

    /// Revenue for this week, this month, last 7/30/90 days and all time
    Revenue,

    /// Weekday x hour fiat volume for one side
    Heatmap {
        /// buy | sell
        #[arg(long, default_value = "buy")]
        side: String,

        /// Inclusive lower bound, `YYYY-MM-DD[ HH:MM:SS]`
        #[arg(long)]
        from: Option<String>,

        /// Inclusive upper bound, `YYYY-MM-DD[ HH:MM:SS]`; a bare date means the whole day
        #[arg(long)]
        to: Option<String>,
    },

    /// Trailing slice of the daily series for the area chart
    Chart {
        /// 7d | 30d | 90d (overrides report.chart_range)
        #[arg(long)]
        range: Option<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => commands::config_hash(&paths),
        Commands::Daily => commands::report::daily(&commands::load_context(&cli.common)?),
        Commands::Monthly { spread_mode } => {
            commands::report::monthly(&commands::load_context(&cli.common)?, spread_mode.as_deref())
        }
        Commands::Velocity { window } => {
            commands::report::velocity(&commands::load_context(&cli.common)?, window.as_deref())
        }
        Commands::Revenue => commands::report::revenue(&commands::load_context(&cli.common)?),
        Commands::Heatmap { side, from, to } => commands::report::heatmap(
            &commands::load_context(&cli.common)?,
            &side,
            from.as_deref(),
            to.as_deref(),
        ),
        Commands::Chart { range } => {
            commands::report::chart(&commands::load_context(&cli.common)?, range.as_deref())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
