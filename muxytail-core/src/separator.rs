//! Full-width rule lines injected between bursts of output.

use crate::color::Colorizer;
use crate::mux::MuxError;

/// Source of the current output width in columns.
pub trait TerminalWidth: Send + Sync {
    fn columns(&self) -> Result<u16, MuxError>;
}

/// Queries the controlling terminal on every call, so resizes are picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSize;

impl TerminalWidth for TerminalSize {
    fn columns(&self) -> Result<u16, MuxError> {
        let (columns, _rows) = crossterm::terminal::size().map_err(MuxError::TerminalSize)?;
        Ok(columns)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedWidth(pub u16);

impl TerminalWidth for FixedWidth {
    fn columns(&self) -> Result<u16, MuxError> {
        Ok(self.0)
    }
}

pub struct Separator {
    colorizer: Colorizer,
    rule: String,
    width: Box<dyn TerminalWidth>,
}

impl Separator {
    pub fn new(colorizer: Colorizer, rule: String, width: Box<dyn TerminalWidth>) -> Self {
        Self {
            colorizer,
            rule,
            width,
        }
    }

    pub fn columns(&self) -> Result<u16, MuxError> {
        self.width.columns()
    }

    /// Renders the rule across the full width. A multi-character rule is
    /// repeated and cut at the last column.
    pub fn display(&self) -> Result<String, MuxError> {
        let columns = usize::from(self.columns()?);
        let line: String = self.rule.chars().cycle().take(columns).collect();
        Ok(self.colorizer.paint(&line))
    }
}
