use crate::format::{FormatResult, Formatter, FormatterChain};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Rewrites lines containing `needle` as `tag:<line>`.
struct MockFormatter {
    needle: &'static str,
    tag: &'static str,
}

impl Formatter for MockFormatter {
    fn name(&self) -> &'static str {
        self.tag
    }

    fn format(&self, line: &str) -> FormatResult {
        if line.contains(self.needle) {
            FormatResult::Formatted(format!("{}:{line}", self.tag))
        } else {
            FormatResult::Declined
        }
    }
}

fn chain() -> FormatterChain {
    FormatterChain::new(vec![
        Arc::new(MockFormatter {
            needle: "a",
            tag: "first",
        }),
        Arc::new(MockFormatter {
            needle: "b",
            tag: "second",
        }),
    ])
}

#[test]
fn empty_chain_passes_lines_through() {
    let chain = FormatterChain::default();

    assert!(chain.is_empty());
    assert_eq!(chain.format("anything"), "anything");
}

#[test]
fn first_formatter_wins() {
    assert_eq!(chain().format("ab"), "first:ab");
}

#[test]
fn second_formatter_used_when_first_declines() {
    assert_eq!(chain().format("b"), "second:b");
}

#[test]
fn unrecognized_line_is_unchanged() {
    assert_eq!(chain().format("xyz"), "xyz");
}

#[test]
fn empty_line_is_unchanged() {
    assert_eq!(chain().format(""), "");
}

#[test]
fn names_follow_order() {
    let chain = chain();

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.names(), vec!["first", "second"]);
}

#[test]
fn plain_text_passes_through_real_formatters() {
    use crate::color::Colorizer;
    use crate::format::access_log::resolve::NoResolver;
    use crate::format::access_log::{AccessLogColors, AccessLogFormatter};
    use crate::format::pattern::{PatternFormatter, PatternRule};

    // Arrange
    let patterns = PatternFormatter::new(vec![PatternRule {
        colorizer: Colorizer::new("#ff0000"),
        patterns: vec!["ERROR".to_string()],
    }])
    .unwrap();
    let chain = FormatterChain::new(vec![
        Arc::new(AccessLogFormatter::new(
            AccessLogColors::default(),
            Arc::new(NoResolver),
        )),
        Arc::new(patterns),
    ]);

    // Act
    let out = chain.format("hello world");

    // Assert
    assert_eq!(out, "hello world");
}
