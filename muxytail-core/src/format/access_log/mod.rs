//! JSON access log formatting.
//!
//! Structured access log lines are decoded into an [`AccessLogRecord`] and
//! re-rendered as one compact, colored line:
//!
//! ```text
//! host [2/Oct 14:05:09] example.com/index.html (200) GET HTTP/2.0 https://ref/ [Firefox 118 │ Linux]
//! ```
//!
//! Decoding is kept apart from rendering so records can be inspected without
//! any color or name resolution involved.

mod record;
pub mod render;
pub mod resolve;
#[cfg(test)]
mod tests;
pub mod user_agent;

pub use record::{AccessLogRecord, HeaderValues, RequestHeaders, RequestRecord};

use super::{FormatResult, Formatter};
use crate::color::Colorizer;
use chrono::{Local, TimeZone};
use render::{StatusClass, classify_status, collapse_whitespace, format_timestamp, longest};
use resolve::HostResolver;
use std::fmt::Display;
use std::sync::Arc;
use user_agent::WootheeEngine;

#[derive(Debug, Clone, Default)]
pub struct AccessLogColors {
    pub bracket: Colorizer,
    pub host: Colorizer,
    pub status_ok: Colorizer,
    pub status_error: Colorizer,
    pub status_other: Colorizer,
    pub url: Colorizer,
}

pub struct AccessLogFormatter {
    colors: AccessLogColors,
    resolver: Arc<dyn HostResolver>,
    ua_engine: WootheeEngine,
}

impl AccessLogFormatter {
    pub fn new(colors: AccessLogColors, resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            colors,
            resolver,
            ua_engine: WootheeEngine::new(),
        }
    }

    /// Renders `record` with timestamps in local time.
    pub fn render(&self, record: &AccessLogRecord) -> String {
        self.render_in(record, &Local)
    }

    pub fn render_in<Tz>(&self, record: &AccessLogRecord, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let bracket_l = self.colors.bracket.paint("[");
        let bracket_r = self.colors.bracket.paint("]");
        let req = &record.request;

        let line = format!(
            "{} {bracket_l}{}{bracket_r} {} ({}) {} {} {} {bracket_l}{}{bracket_r}",
            self.colors.host.paint(&self.host(&req.remote_ip)),
            format_timestamp(record.ts, tz),
            self.colors.url.paint(&record.url()),
            self.status(record.status),
            req.method,
            req.proto,
            longest(req.headers.referer.as_slice()),
            self.ua_engine.describe(req.headers.user_agent.as_slice()),
        );

        collapse_whitespace(&line)
    }

    fn host(&self, remote_ip: &str) -> String {
        if remote_ip.is_empty() {
            return String::new();
        }
        self.resolver
            .resolve(remote_ip)
            .unwrap_or_else(|| remote_ip.to_string())
    }

    fn status(&self, status: i64) -> String {
        let colorizer = match classify_status(status) {
            StatusClass::Ok => &self.colors.status_ok,
            StatusClass::Error => &self.colors.status_error,
            StatusClass::Other => &self.colors.status_other,
        };
        colorizer.paint(&status.to_string())
    }
}

impl Formatter for AccessLogFormatter {
    fn name(&self) -> &'static str {
        "access_log"
    }

    fn format(&self, line: &str) -> FormatResult {
        match AccessLogRecord::decode(line) {
            Ok(record) => FormatResult::Formatted(self.render(&record)),
            Err(_) => FormatResult::Declined,
        }
    }
}
