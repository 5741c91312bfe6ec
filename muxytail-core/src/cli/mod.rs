mod check;
mod run;

pub use check::*;
use clap::Subcommand;
pub use run::*;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Follow the configured files (default)
    #[default]
    Run,

    /// Validate configuration and exit
    Check,
}
