mod commands;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use errlog_config::CliOverrides;
use errlog_core::{Severity, StatsOrder};
use errlog_engine::summary::format_summary;
use errlog_engine::StatsFilter;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CliError, StatOptions};

#[derive(Parser)]
#[command(
    name = "errlog",
    version,
    about = "Extract hosts, servers and error statistics from nginx error logs on stdin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Count only messages for the specified host (error-stat)
    #[arg(long, global = true)]
    host: Option<String>,
    /// TOML config file
    #[arg(long, global = true, env = "ERRLOG_CONFIG")]
    config: Option<PathBuf>,
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List distinct values of the `host` parameter
    ListHosts,
    /// List distinct values of the `server` parameter
    ListServers,
    /// List distinct values of any parameter
    ListValues {
        /// Parameter name, e.g. client or upstream
        key: String,
    },
    /// Count error messages with filenames normalized away
    ErrorStat {
        /// Skip records below this level
        #[arg(long)]
        min_level: Option<Severity>,
        /// Row order: first-seen or count
        #[arg(long)]
        order: Option<StatsOrder>,
        /// Token that replaces filenames
        #[arg(long)]
        placeholder: Option<String>,
    },
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "errlog=warn",
        1 => "errlog=info",
        _ => "errlog=debug",
    }
}

/// Initialise the tracing subscriber. Diagnostics go to stderr so they never
/// mix with results on stdout.
fn init_logging(verbose: u8) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = errlog_config::load_or_default(cli.config.as_deref())?;

    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());

    let summary = match cli.command {
        Commands::ListHosts => commands::list::run("host", cli.json, stdin, &mut stdout)?,
        Commands::ListServers => commands::list::run("server", cli.json, stdin, &mut stdout)?,
        Commands::ListValues { key } => commands::list::run(&key, cli.json, stdin, &mut stdout)?,
        Commands::ErrorStat {
            min_level,
            order,
            placeholder,
        } => {
            let overrides = CliOverrides {
                placeholder,
                order,
                min_level,
            };
            let stats = errlog_config::merge_with_cli(&config.stats, &overrides)?;
            let opts = StatOptions {
                filter: StatsFilter {
                    host: cli.host,
                    min_level: stats.min_level,
                },
                order: stats.order,
                placeholder: stats.placeholder,
            };
            commands::stat::run(&opts, cli.json, stdin, &mut stdout)?
        }
    };

    info!("{}", format_summary(&summary));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
