use serde::Deserialize;

/// Root of the configuration file.
///
/// ```hcl
/// files = ["/var/log/caddy/*.log"]
///
/// separator {
///   color = "#ff0000"
/// }
///
/// colorize = [
///   { color = "#ff5555", patterns = ["ERROR", "FATAL"] },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MuxytailConfig {
    /// Glob patterns of the files to follow, relative to the config file.
    #[serde(default)]
    pub files: Vec<String>,

    /// Concurrent formatting steps per file. `1` keeps each file's lines in order.
    #[serde(default = "default_format_workers")]
    pub format_workers: usize,

    /// How often each file is checked for new lines, rotation and truncation.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub separator: SeparatorConfig,

    #[serde(default)]
    pub access_log: AccessLogConfig,

    /// Applied in the order listed; the first rule to color a span keeps it.
    #[serde(default)]
    pub colorize: Vec<ColorRuleConfig>,
}

fn default_format_workers() -> usize {
    4
}

fn default_poll_interval_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeparatorConfig {
    #[serde(default)]
    pub color: String,

    /// Repeated across the terminal.
    #[serde(default = "default_rule")]
    pub rule: String,

    /// Fixed width in columns. The terminal is queried when unset.
    #[serde(default)]
    pub width: Option<u16>,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            color: String::new(),
            rule: default_rule(),
            width: None,
        }
    }
}

fn default_rule() -> String {
    "─".to_string()
}

/// Colors of the JSON access log formatter. Every field is a color spec.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessLogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub bracket: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub status_ok: String,
    #[serde(default)]
    pub status_error: String,
    #[serde(default)]
    pub status_other: String,
    #[serde(default)]
    pub url: String,

    /// Reverse-resolve client addresses to host names.
    #[serde(default = "default_true")]
    pub resolve_hosts: bool,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bracket: String::new(),
            host: String::new(),
            status_ok: String::new(),
            status_error: String::new(),
            status_other: String::new(),
            url: String::new(),
            resolve_hosts: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColorRuleConfig {
    pub color: String,
    pub patterns: Vec<String>,
}
