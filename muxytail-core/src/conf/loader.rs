use crate::conf::error::ConfigError;
use crate::conf::types::MuxytailConfig;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "/usr/local/etc/muxytail.hcl";

pub fn load_config(path: &Path) -> Result<MuxytailConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(path, &contents)
}

/// Parses configuration text. `path` is only used for error reporting.
pub fn parse_config(path: &Path, contents: &str) -> Result<MuxytailConfig, ConfigError> {
    let config: MuxytailConfig =
        hcl::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;

    tracing::debug!(
        path = %path.display(),
        files = config.files.len(),
        rules = config.colorize.len(),
        "config parsed"
    );

    Ok(config)
}
