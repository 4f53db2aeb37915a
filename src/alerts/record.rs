//! Alert values and their relative-time labels.

use std::fmt;

use serde::Serialize;

/// Urgency of an alert. Used for styling only, never for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Danger => "DANGER",
        }
    }
}

/// An immutable alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRecord {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Logical creation time in seconds since the dashboard started.
    pub timestamp: u64,
}

impl AlertRecord {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            description: description.into(),
            timestamp,
        }
    }
}

/// Displayed age of an alert, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct AlertAge(pub u32);

impl AlertAge {
    pub const JUST_NOW: AlertAge = AlertAge(0);

    pub fn minutes(n: u32) -> Self {
        AlertAge(n)
    }

    pub fn advanced(self, minutes: u32) -> Self {
        AlertAge(self.0.saturating_add(minutes))
    }
}

impl fmt::Display for AlertAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "Just now"),
            1 => write!(f, "1 minute ago"),
            n => write!(f, "{} minutes ago", n),
        }
    }
}
