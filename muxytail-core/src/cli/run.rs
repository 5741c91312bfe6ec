use crate::cli::config_root;
use crate::conf::{BuildOptions, RuntimeSettings, load_config};
use crate::mux::{self, InputModeGuard, Shutdown, install_signal_handlers};
use anyhow::Context;
use std::io;
use std::path::Path;
use tokio::runtime::Builder;

/// Load `path` and multiplex until the quit key, SIGINT, or a fatal error.
pub fn run(path: &Path, options: BuildOptions) -> anyhow::Result<()> {
    let cfg = load_config(path)?;
    let settings = RuntimeSettings::build(&cfg, config_root(path), options)?;

    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let shutdown = Shutdown::new();

    rt.spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = install_signal_handlers(shutdown).await {
                tracing::warn!(error = %e, "signal handling unavailable");
            }
        }
    });

    let result = {
        let _input_mode = InputModeGuard::enable()?;
        let mut out = io::stdout().lock();
        rt.block_on(mux::run(&settings, tokio::io::stdin(), &mut out, shutdown))
    };

    // Blocking stdin reads never return on their own.
    rt.shutdown_background();

    result.map_err(Into::into)
}
