//! Status reporting shared by every panel operation.
//!
//! Operations never fail from the caller's point of view: they hand back an
//! [`Outcome`] holding the buffer to write into the input field and the status
//! line to show underneath it.

use std::fmt;

use serde::Serialize;

/// How the host should color the status line.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// CSS color the host page applies to the message element.
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Error => "red",
        }
    }
}

/// Message plus severity; overwritten by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }
}

/// Reasons an operation leaves the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Buffer is empty or whitespace only.
    EmptyInput,
    /// Buffer parses as neither JSON nor YAML.
    InvalidFormat,
    /// Nothing left to sort once blank lines are dropped.
    NoLines,
    /// Serializer error surfaced with its own message.
    Conversion(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("Input is empty"),
            Self::InvalidFormat => f.write_str("Invalid JSON or YAML format"),
            Self::NoLines => f.write_str("No lines to sort"),
            Self::Conversion(msg) => write!(f, "Conversion error: {msg}"),
        }
    }
}

impl From<Failure> for Status {
    fn from(failure: Failure) -> Self {
        Status::error(failure.to_string())
    }
}

/// New buffer contents and the status to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub buffer: String,
    pub status: Status,
}

impl Outcome {
    pub fn success(buffer: String, message: impl Into<String>) -> Self {
        Self {
            buffer,
            status: Status::success(message),
        }
    }

    /// Reports `failure` and hands the original buffer back unchanged.
    pub fn failure(original: &str, failure: Failure) -> Self {
        tracing::warn!(reason = %failure, "panel operation rejected input");
        Self {
            buffer: original.to_string(),
            status: failure.into(),
        }
    }

    /// Flattens into the shape the host adapter reads.
    pub fn to_report(&self) -> OutcomeReport<'_> {
        OutcomeReport {
            buffer: &self.buffer,
            message: &self.status.message,
            severity: self.status.severity,
            color: self.status.severity.color(),
        }
    }
}

/// Serialized view of an [`Outcome`] handed to JavaScript.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeReport<'a> {
    pub buffer: &'a str,
    pub message: &'a str,
    pub severity: Severity,
    pub color: &'static str,
}

/// Whitespace as browsers trim it: Unicode white space plus the byte-order mark.
pub fn is_blank_char(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

/// Strips leading and trailing [`is_blank_char`] characters.
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank_char)
}

/// Shared guard: every operation rejects blank input first.
pub(crate) fn require_content(buffer: &str) -> Result<(), Failure> {
    if trim_blank(buffer).is_empty() {
        Err(Failure::EmptyInput)
    } else {
        Ok(())
    }
}
