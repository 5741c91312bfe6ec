use crate::conf::error::ConfigError;
use crate::conf::{BuildOptions, MuxytailConfig, RuntimeSettings, load_config};
use std::path::Path;

pub fn check(path: &Path, options: BuildOptions) -> anyhow::Result<()> {
    let root = config_root(path);
    let result =
        load_config(path).and_then(|cfg| RuntimeSettings::build(&cfg, root, options).map(|s| (cfg, s)));

    match result {
        Ok((cfg, settings)) => {
            for line in summarize(&cfg, &settings) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

/// Directory that relative `files` patterns are resolved against.
pub fn config_root(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

pub fn summarize(cfg: &MuxytailConfig, settings: &RuntimeSettings) -> Vec<String> {
    let patterns: usize = cfg.colorize.iter().map(|r| r.patterns.len()).sum();
    let formatters = if settings.chain.is_empty() {
        "none".to_string()
    } else {
        settings.chain.names().join(", ")
    };

    vec![
        "✔ Config loaded successfully".to_string(),
        format!("✔ {} files", settings.sources.len()),
        format!("✔ {} colorize rules", cfg.colorize.len()),
        format!("✔ {patterns} patterns"),
        format!("✔ formatters: {formatters}"),
        format!("✔ {} format workers per file", settings.format_workers),
    ]
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::NoFiles => Some(
            "List at least one file to follow.\n\
             \n\
             Example:\n\
             \n\
             files = [\"/var/log/caddy/*.log\"]",
        ),

        ConfigError::NoMatch { .. } => Some(
            "Every entry in `files` must match an existing file.\n\
             \n\
             Relative patterns are resolved against the directory of the config file.",
        ),

        ConfigError::InvalidPattern { .. } => Some(
            "Colorize patterns use Rust regex syntax.\n\
             \n\
             Escape literal brackets and dots, e.g. \"\\\\[error\\\\]\".",
        ),

        ConfigError::InvalidWorkers => Some(
            "format_workers must be 1 or more.\n\
             \n\
             Use 1 to keep the lines of each file in order.",
        ),

        ConfigError::InvalidPollInterval => Some(
            "poll_interval_ms is how often each file is checked for new lines.\n\
             \n\
             The default is 250.",
        ),

        ConfigError::EmptySeparatorRule => Some(
            "The separator rule is the text repeated across the terminal.\n\
             \n\
             Example:\n\
             \n\
             separator {\n  rule = \"─\"\n}",
        ),

        _ => None,
    }
}
