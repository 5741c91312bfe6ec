use std::ffi::OsString;
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Set to any value to log JSON instead of text.
pub const LOG_JSON_ENV: &str = "MUXYTAIL_LOG_JSON";

/// Initialize diagnostics on stderr.
///
/// stdout carries the multiplexed log lines, so nothing else may write there.
/// Filtering follows `RUST_LOG` and defaults to "warn".
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    if std::env::var_os(LOG_JSON_ENV).is_some() {
        builder.json().flatten_event(true).init();
    } else {
        builder.with_ansi(io::stderr().is_terminal()).init();
    }
}

/// Whether output lines should carry color.
///
/// `--no-color` and a non-empty `NO_COLOR` both turn it off.
pub fn color_enabled(no_color_flag: bool) -> bool {
    color_choice(no_color_flag, std::env::var_os("NO_COLOR"))
}

fn color_choice(no_color_flag: bool, no_color_env: Option<OsString>) -> bool {
    !no_color_flag && no_color_env.is_none_or(|v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::color_choice;
    use std::ffi::OsString;

    #[test]
    fn color_is_on_by_default() {
        assert!(color_choice(false, None));
    }

    #[test]
    fn flag_disables_color() {
        assert!(!color_choice(true, None));
    }

    #[test]
    fn no_color_env_disables_color() {
        assert!(!color_choice(false, Some(OsString::from("1"))));
    }

    #[test]
    fn empty_no_color_env_is_ignored() {
        assert!(color_choice(false, Some(OsString::new())));
    }
}
