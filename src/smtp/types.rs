use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Outcome of the SMTP stage.
///
/// `Inconclusive` covers timeouts and transient replies. It scores
/// differently from `Skipped`, which means the stage never ran.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpVerdict {
    Pass,
    Fail,
    Inconclusive,
    #[default]
    Skipped,
}

impl SmtpVerdict {
    /// Nullable-boolean view: `Some(true)`, `Some(false)`, or `None` for
    /// inconclusive and skipped probes.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Pass => Some(true),
            Self::Fail => Some(false),
            Self::Inconclusive | Self::Skipped => None,
        }
    }

    #[cfg(feature = "with-serde")]
    pub(crate) fn serialize_nullable<S>(verdict: &Self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        verdict.as_option().serialize(serializer)
    }
}

impl fmt::Display for SmtpVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Fail => f.write_str("fail"),
            Self::Inconclusive => f.write_str("inconclusive"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// A raw SMTP reply, preserving the numeric status code and message text.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

/// What a completed handshake observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpOutcome {
    pub rcpt: SmtpReply,
    /// `Some(true)` when a random alias was also accepted.
    pub catch_all: Option<bool>,
    pub transcript: Vec<String>,
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmtpReport {
    pub verdict: SmtpVerdict,
    pub details: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub exchange: Option<String>,
    pub skipped: bool,
    pub timeout: bool,
    pub popular_provider: bool,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub reply: Option<SmtpReply>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub catch_all: Option<bool>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub transcript: Vec<String>,
}

impl SmtpReport {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            verdict: SmtpVerdict::Skipped,
            details: reason.into(),
            skipped: true,
            ..Self::default()
        }
    }
}
