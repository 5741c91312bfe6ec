use super::render::{longest, major};
use woothee::parser::Parser;

/// woothee's placeholder for fields it could not determine.
const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub is_bot: bool,
    pub browser: String,
    pub version: String,
    pub os: String,
    pub os_version: String,
}

impl UserAgentInfo {
    /// `[BOT: ]<browser> <major> │ <os> <os major>`.
    ///
    /// The os part is dropped when the os is unknown. The os version is
    /// dropped when the os name already carries one (`Windows 10`).
    pub fn summary(&self) -> String {
        let os_version = if self.os.ends_with(|c: char| c.is_ascii_digit()) {
            ""
        } else {
            major(&self.os_version)
        };

        let bot = if self.is_bot { "BOT:" } else { "" };
        let parts = [
            bot,
            self.browser.as_str(),
            major(&self.version),
            "│",
            self.os.as_str(),
            os_version,
        ];

        let joined = parts
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        match joined.strip_suffix(" │") {
            Some(trimmed) => trimmed.to_string(),
            None => joined,
        }
    }
}

fn known(value: &str) -> String {
    if value == UNKNOWN {
        String::new()
    } else {
        value.to_string()
    }
}

pub struct WootheeEngine {
    parser: Parser,
}

impl Default for WootheeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WootheeEngine {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&self, ua: &str) -> Option<UserAgentInfo> {
        let result = self.parser.parse(ua)?;

        let info = UserAgentInfo {
            is_bot: result.category == "crawler",
            browser: known(&result.name),
            version: known(&result.version),
            os: known(&result.os),
            os_version: known(&result.os_version),
        };

        if info.browser.is_empty() {
            return None;
        }
        Some(info)
    }

    /// Summarizes the longest of the logged user agents.
    ///
    /// `-` when none was logged; the raw string when it is not recognized.
    pub fn describe(&self, values: &[String]) -> String {
        let chosen = longest(values);
        if chosen.is_empty() {
            return "-".to_string();
        }

        match self.parse(chosen) {
            Some(info) => info.summary(),
            None => chosen.to_string(),
        }
    }
}
