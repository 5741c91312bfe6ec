/// A formatted line from one of the followed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent(pub String);

/// A rendered separator, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorEvent(pub String);
