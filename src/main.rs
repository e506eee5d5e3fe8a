mod handlers;

use anyhow::Result;
use bundle_status::engine::config::{RenderConfig, DEFAULT_BAR_WIDTH, MAX_BAR_WIDTH};
use bundle_status::engine::snapshot::STDIN_PATH;
use bundle_status::engine::types::BundleType;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bundle-status",
    version,
    about = "Who agreed, who paid, and what a shared bill should show"
)]
struct Cli {
    /// Output as JSON
    #[arg(long, short = 'j', global = true)]
    json: bool,

    /// Disable colored output (NO_COLOR is also honored)
    #[arg(long, global = true)]
    no_color: bool,

    /// Width of the progress bar in cells
    #[arg(
        long,
        global = true,
        env = "BUNDLE_STATUS_BAR_WIDTH",
        default_value_t = DEFAULT_BAR_WIDTH,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_BAR_WIDTH))
    )]
    bar_width: u16,

    /// Override the bundle type carried by the snapshot
    #[arg(long, global = true, env = "BUNDLE_STATUS_BUNDLE_TYPE")]
    bundle_type: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Show the derived status of a bundle
    Status {
        /// Snapshot JSON file (`-` for stdin)
        #[arg(default_value = STDIN_PATH)]
        snapshot: PathBuf,
    },
    /// List each participant's visual state
    Participants {
        /// Snapshot JSON file (`-` for stdin)
        #[arg(default_value = STDIN_PATH)]
        snapshot: PathBuf,
    },
    /// Explain which rules produced the status
    Explain {
        /// Snapshot JSON file (`-` for stdin)
        #[arg(default_value = STDIN_PATH)]
        snapshot: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RenderConfig {
        bar_width: cli.bar_width,
        color: !cli.no_color,
        bundle_type: cli.bundle_type.as_deref().map(BundleType::from),
    };
    config.apply();
    tracing::debug!(?config, "render config");

    match cli.command {
        Commands::Status { snapshot } => handlers::status::handle(&snapshot, &config, cli.json),
        Commands::Participants { snapshot } => {
            handlers::participants::handle(&snapshot, &config, cli.json)
        }
        Commands::Explain { snapshot } => handlers::explain::handle(&snapshot, &config, cli.json),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
