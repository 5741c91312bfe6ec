use crate::color::Colorizer;
use crate::conf::discover::discover_files;
use crate::conf::error::ConfigError;
use crate::conf::types::{AccessLogConfig, MuxytailConfig};
use crate::format::access_log::resolve::{CachingResolver, DnsResolver, HostResolver, NoResolver};
use crate::format::access_log::{AccessLogColors, AccessLogFormatter};
use crate::format::pattern::{PatternFormatter, PatternRule};
use crate::format::{Formatter, FormatterChain};
use crate::separator::{FixedWidth, Separator, TerminalSize, TerminalWidth};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Emit color escape sequences.
    pub color: bool,
    /// Print lines as read, skipping every formatter.
    pub raw: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            color: true,
            raw: false,
        }
    }
}

/// Everything the multiplexer needs, compiled from a `MuxytailConfig`.
///
/// Read-only once built; shared between tasks through `Arc`.
pub struct RuntimeSettings {
    pub sources: Vec<PathBuf>,
    pub chain: Arc<FormatterChain>,
    pub separator: Arc<Separator>,
    pub format_workers: usize,
    pub poll_interval: Duration,
}

impl RuntimeSettings {
    /// Compiles `config`. Relative file patterns are resolved against `root`.
    pub fn build(
        config: &MuxytailConfig,
        root: &Path,
        options: BuildOptions,
    ) -> Result<Self, ConfigError> {
        if config.files.is_empty() {
            return Err(ConfigError::NoFiles);
        }
        if config.format_workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if config.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        if config.separator.rule.is_empty() {
            return Err(ConfigError::EmptySeparatorRule);
        }

        let sources = discover_files(root, &config.files)?;

        let palette = |spec: &str| {
            if options.color {
                Colorizer::new(spec)
            } else {
                Colorizer::plain()
            }
        };

        // Patterns are compiled even in raw mode so a bad config never starts.
        let chain = build_chain(config, &palette)?;
        let chain = if options.raw {
            FormatterChain::default()
        } else {
            chain
        };

        let width: Box<dyn TerminalWidth> = match config.separator.width {
            Some(columns) => Box::new(FixedWidth(columns)),
            None => Box::new(TerminalSize),
        };
        let separator = Separator::new(
            palette(&config.separator.color),
            config.separator.rule.clone(),
            width,
        );

        tracing::info!(
            sources = sources.len(),
            formatters = chain.len(),
            format_workers = config.format_workers,
            poll_interval_ms = config.poll_interval_ms,
            raw = options.raw,
            "runtime settings built"
        );

        Ok(Self {
            sources,
            chain: Arc::new(chain),
            separator: Arc::new(separator),
            format_workers: config.format_workers,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }
}

fn build_chain(
    config: &MuxytailConfig,
    palette: &impl Fn(&str) -> Colorizer,
) -> Result<FormatterChain, ConfigError> {
    let mut formatters: Vec<Arc<dyn Formatter>> = Vec::new();

    if config.access_log.enabled {
        formatters.push(Arc::new(build_access_log(&config.access_log, palette)));
    }

    let rules = config
        .colorize
        .iter()
        .map(|rule| PatternRule {
            colorizer: palette(&rule.color),
            patterns: rule.patterns.clone(),
        })
        .collect();
    let patterns = PatternFormatter::new(rules)?;
    tracing::debug!(
        rules = config.colorize.len(),
        patterns = patterns.pattern_count(),
        "colorize patterns compiled"
    );
    if !patterns.is_empty() {
        formatters.push(Arc::new(patterns));
    }

    Ok(FormatterChain::new(formatters))
}

fn build_access_log(
    cfg: &AccessLogConfig,
    palette: &impl Fn(&str) -> Colorizer,
) -> AccessLogFormatter {
    let colors = AccessLogColors {
        bracket: palette(&cfg.bracket),
        host: palette(&cfg.host),
        status_ok: palette(&cfg.status_ok),
        status_error: palette(&cfg.status_error),
        status_other: palette(&cfg.status_other),
        url: palette(&cfg.url),
    };

    let resolver: Arc<dyn HostResolver> = if cfg.resolve_hosts {
        Arc::new(CachingResolver::new(DnsResolver))
    } else {
        Arc::new(NoResolver)
    };

    AccessLogFormatter::new(colors, resolver)
}
