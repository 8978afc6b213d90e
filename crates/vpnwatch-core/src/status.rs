//! Monitoring-plugin status line assembly.
//!
//! One line of the form `<label> - <messages> | <perfdata>`, consumed by
//! the alerting system together with the severity exit code.

use crate::Reading;
use crate::error::CoreError;
use crate::severity::{Severity, Thresholds};

/// Accumulates messages and perfdata tokens for one status line.
#[derive(Debug, Default)]
pub struct StatusLine {
    messages: Vec<String>,
    perfdata: Vec<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all messages with a single one.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.messages = vec![message.into()];
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Perfdata tokens are opaque and pre-formatted (`'VPN_Users'= 42`);
    /// their internal syntax is the caller's responsibility.
    pub fn add_perfdata(&mut self, item: impl Into<String>) {
        self.perfdata.push(item.into());
    }

    /// Render the line. Empty segments are omitted with their separators;
    /// the message segment is sentence-terminated, with degenerate double
    /// separators collapsed so the output never shows `".. "`.
    pub fn render(&self, severity: Severity) -> String {
        let mut output = severity.label().to_owned();

        if !self.messages.is_empty() {
            let mut joined = self.messages.join(". ");
            joined = joined.replace(".. ", ". ").replace("\n. ", "\n");
            if !joined.ends_with('.') {
                joined.push('.');
            }
            output.push_str(" - ");
            output.push_str(&joined);
        }

        if !self.perfdata.is_empty() {
            output.push_str(" | ");
            output.push_str(&self.perfdata.join(" "));
        }

        output
    }
}

/// The result of one check: severity for the exit code, line for stdout.
///
/// Printing and exiting belong to the outermost caller; this type has no
/// side effects.
#[derive(Debug)]
pub struct CheckOutcome {
    pub severity: Severity,
    pub line: String,
}

impl CheckOutcome {
    /// Evaluate a reading against thresholds and format the plugin line.
    pub fn classify(reading: &Reading, thresholds: Thresholds) -> Self {
        let severity = thresholds.evaluate(reading.current_users);
        let mut line = StatusLine::new();
        line.set_message(format!("VPN Users: {}", reading.current_users));
        line.add_perfdata(format!("'VPN_Users'= {}", reading.current_users));
        Self {
            severity,
            line: line.render(severity),
        }
    }

    /// Map a failure to `Unknown` without consulting any thresholds.
    ///
    /// Collection errors already name the host in their display form, so
    /// the line identifies where the check failed.
    pub fn from_failure(error: &CoreError) -> Self {
        let mut line = StatusLine::new();
        line.set_message(error.to_string());
        Self {
            severity: Severity::Unknown,
            line: line.render(Severity::Unknown),
        }
    }
}
