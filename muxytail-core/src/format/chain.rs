use super::{FormatResult, Formatter};
use std::sync::Arc;

/// Ordered formatters; the first one to accept a line wins.
#[derive(Default)]
pub struct FormatterChain {
    formatters: Vec<Arc<dyn Formatter>>,
}

impl FormatterChain {
    pub fn new(formatters: Vec<Arc<dyn Formatter>>) -> Self {
        Self { formatters }
    }

    /// Returns the first formatter's rewrite, or `line` unchanged when every
    /// formatter declines.
    pub fn format(&self, line: &str) -> String {
        for formatter in &self.formatters {
            match formatter.format(line) {
                FormatResult::Formatted(out) => return out,
                FormatResult::Declined => continue,
            }
        }
        line.to_string()
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}
