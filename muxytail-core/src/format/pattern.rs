//! Regex colorization.
//!
//! Every pattern of every rule is applied, in configuration order, to the
//! output of the previous one. Matches are replaced by the rule's colorized
//! text. The formatter remembers which byte ranges it has painted. A match
//! touching one of them, or touching the bytes of any escape sequence, is
//! skipped. The first rule to color a span keeps it, and patterns never match
//! inside escape codes. Text the source already styled is still matched.

use super::{FormatResult, Formatter};
use crate::color::Colorizer;
use crate::conf::ConfigError;
use regex::Regex;
use std::ops::Range;

pub struct PatternRule {
    pub colorizer: Colorizer,
    pub patterns: Vec<String>,
}

struct CompiledRule {
    colorizer: Colorizer,
    patterns: Vec<Regex>,
}

pub struct PatternFormatter {
    rules: Vec<CompiledRule>,
}

impl PatternFormatter {
    /// Compiles every pattern as `(pattern)`.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, ConfigError> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|p| compile(p.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(CompiledRule {
                    colorizer: rule.colorizer,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(|r| r.patterns.is_empty())
    }

    pub fn pattern_count(&self) -> usize {
        self.rules.iter().map(|r| r.patterns.len()).sum()
    }

    /// Applies every rule, returning the rewritten line.
    pub fn colorize(&self, line: &str) -> String {
        let mut out = Painted {
            text: line.to_string(),
            claimed: Vec::new(),
        };

        // A plain rule would paint nothing and claim nothing.
        for rule in self.rules.iter().filter(|r| !r.colorizer.is_plain()) {
            for re in &rule.patterns {
                out = apply(re, &rule.colorizer, out);
            }
        }

        out.text
    }
}

impl Formatter for PatternFormatter {
    fn name(&self) -> &'static str {
        "colorize"
    }

    fn format(&self, line: &str) -> FormatResult {
        let out = self.colorize(line);
        if out == line {
            FormatResult::Declined
        } else {
            FormatResult::Formatted(out)
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("({pattern})")).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A line being colorized, with the byte ranges this formatter has painted.
struct Painted {
    text: String,
    claimed: Vec<Range<usize>>,
}

impl Painted {
    /// Copies `text[range]`, carrying along the claimed ranges inside it.
    fn copy_from(&mut self, source: &Painted, range: Range<usize>) {
        let shift = self.text.len();
        self.claimed.extend(
            source
                .claimed
                .iter()
                .filter(|span| range.start <= span.start && span.end <= range.end)
                .map(|span| span.start - range.start + shift..span.end - range.start + shift),
        );
        self.text.push_str(&source.text[range]);
    }

    fn push_claimed(&mut self, painted: &str) {
        let start = self.text.len();
        self.text.push_str(painted);
        self.claimed.push(start..self.text.len());
    }
}

fn apply(re: &Regex, colorizer: &Colorizer, line: Painted) -> Painted {
    let escapes = escape_sequences(&line.text);
    let overlaps = |spans: &[Range<usize>], m: &Range<usize>| {
        spans.iter().any(|span| m.start < span.end && span.start < m.end)
    };

    let mut out = Painted {
        text: String::with_capacity(line.text.len()),
        claimed: Vec::with_capacity(line.claimed.len()),
    };
    let mut last = 0;

    for caps in re.captures_iter(&line.text) {
        let whole = caps.get_match().range();
        let Some(group) = caps.get(1) else {
            continue;
        };
        if group.is_empty() || overlaps(&line.claimed, &whole) || overlaps(&escapes, &whole) {
            continue;
        }

        out.copy_from(&line, last..whole.start);
        out.text.push_str(&line.text[whole.start..group.start()]);
        out.push_claimed(&colorizer.paint(group.as_str()));
        out.text.push_str(&line.text[group.end()..whole.end]);
        last = whole.end;
    }

    out.copy_from(&line, last..line.text.len());
    out
}

/// Byte ranges of the escape sequences in `text`.
///
/// A CSI sequence runs from `ESC [` through its final byte. Any other escape
/// covers `ESC` and the byte after it.
fn escape_sequences(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != 0x1b {
            i += 1;
            continue;
        }

        let end = if bytes.get(i + 1) == Some(&b'[') {
            let mut j = i + 2;
            while j < bytes.len() && !(0x40..=0x7e).contains(&bytes[j]) {
                j += 1;
            }
            (j + 1).min(bytes.len())
        } else {
            (i + 2).min(bytes.len())
        };

        spans.push(i..end);
        i = end;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::escape_sequences;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_has_no_escapes() {
        assert!(escape_sequences("nothing to see").is_empty());
    }

    #[test]
    fn each_sequence_is_its_own_span() {
        let text = "a \x1b[31mred\x1b[0m b";

        assert_eq!(escape_sequences(text), vec![2..7, 10..14]);
    }

    #[test]
    fn non_sgr_sequences_are_covered() {
        let text = "\x1b[Kline\x1b[39m";

        assert_eq!(escape_sequences(text), vec![0..3, 7..12]);
    }

    #[test]
    fn unterminated_sequence_runs_to_end() {
        let text = "x\x1b[1;31";

        assert_eq!(escape_sequences(text), vec![1..text.len()]);
    }

    #[test]
    fn lone_escape_covers_next_byte() {
        assert_eq!(escape_sequences("a\x1b(Bb"), vec![1..3]);
    }
}
