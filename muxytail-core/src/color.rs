use owo_colors::{DynColors, Style};
use std::str::FromStr;

/// Renders text in the colors named by a color spec.
///
/// A spec is `"FG"` or `"FG|BG"`, where each token is a `#RRGGBB` hex
/// triplet or an ANSI color name (`red`, `bright blue`, ...). The empty spec
/// renders text unchanged.
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    style: Option<Style>,
}

impl Colorizer {
    pub fn new(spec: &str) -> Self {
        if spec.is_empty() {
            return Self::plain();
        }

        let mut parts = spec.splitn(2, '|');
        let fg = parts.next().and_then(|token| parse_token(spec, token));
        let bg = parts.next().and_then(|token| parse_token(spec, token));

        let style = match (fg, bg) {
            (None, None) => None,
            (Some(fg), None) => Some(Style::new().color(fg)),
            (None, Some(bg)) => Some(Style::new().on_color(bg)),
            (Some(fg), Some(bg)) => Some(Style::new().color(fg).on_color(bg)),
        };

        Self { style }
    }

    /// The identity colorizer.
    pub fn plain() -> Self {
        Self { style: None }
    }

    pub fn is_plain(&self) -> bool {
        self.style.is_none()
    }

    pub fn paint(&self, text: &str) -> String {
        match &self.style {
            Some(style) => style.style(text).to_string(),
            None => text.to_string(),
        }
    }
}

fn parse_token(spec: &str, token: &str) -> Option<DynColors> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    match DynColors::from_str(token) {
        Ok(color) => Some(color),
        Err(_) => {
            tracing::warn!(spec, token, "unrecognized color, rendering unstyled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_spec_is_identity() {
        let c = Colorizer::new("");

        assert!(c.is_plain());
        assert_eq!(c.paint("hello"), "hello");
        assert_eq!(c.paint(""), "");
    }

    #[test]
    fn foreground_only() {
        let out = Colorizer::new("#ff0000").paint("x");

        assert!(out.starts_with("\x1b["));
        assert!(out.contains("38;2;255;0;0"));
        assert!(!out.contains("48;2;"));
        assert!(out.contains('x'));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn foreground_and_background() {
        let out = Colorizer::new("#ff0000|#0000ff").paint("x");

        assert!(out.contains("38;2;255;0;0"));
        assert!(out.contains("48;2;0;0;255"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn named_color() {
        let out = Colorizer::new("red").paint("x");

        assert_ne!(out, "x");
        assert!(out.contains('x'));
    }

    #[test]
    fn unrecognized_token_degrades_to_plain() {
        let c = Colorizer::new("definitely-not-a-color");

        assert!(c.is_plain());
        assert_eq!(c.paint("x"), "x");
    }

    #[test]
    fn unrecognized_background_keeps_foreground() {
        let out = Colorizer::new("#00ff00|bogus").paint("x");

        assert!(out.contains("38;2;0;255;0"));
        assert!(!out.contains("48;2;"));
    }
}
