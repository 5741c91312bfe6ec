use clap::Parser;
use muxytail_core::cli::{self, Command};
use muxytail_core::conf::{BuildOptions, DEFAULT_CONFIG_PATH};
use muxytail_core::logging::{color_enabled, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "muxytail",
    version,
    about = "Follow several log files as one colorized stream"
)]
struct Cli {
    /// Path to the muxytail config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print without color escape sequences
    #[arg(long, global = true)]
    no_color: bool,

    /// Print lines exactly as read, skipping every formatter
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let options = BuildOptions {
        color: color_enabled(cli.no_color),
        raw: cli.raw,
    };
    tracing::debug!(config = %cli.config.display(), ?options, "starting");

    match cli.command.unwrap_or_default() {
        Command::Run => cli::run(&cli.config, options),
        Command::Check => cli::check(&cli.config, options),
    }
}
