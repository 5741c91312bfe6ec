pub mod access_log;
mod chain;
pub mod pattern;
#[cfg(test)]
mod tests;

pub use chain::FormatterChain;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatResult {
    /// The line was recognized and rewritten
    Formatted(String),

    /// The line was not recognized; the next formatter gets a turn
    Declined,
}

/// A single step of line rewriting.
///
/// Formatters are built once at startup and then shared by every follower's
/// formatting workers, so they must be both Send and Sync and must not
/// mutate themselves while formatting.
pub trait Formatter: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Attempts to rewrite `line`.
    ///
    /// Declining is the normal outcome for lines a formatter does not
    /// understand, never an error.
    fn format(&self, line: &str) -> FormatResult;
}
