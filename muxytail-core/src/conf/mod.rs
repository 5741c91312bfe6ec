mod discover;
pub mod error;
mod loader;
mod runtime;
#[cfg(test)]
mod tests;
pub mod types;

pub use discover::{discover, discover_files};
pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_PATH, load_config, parse_config};
pub use runtime::{BuildOptions, RuntimeSettings};
pub use types::MuxytailConfig;
