use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::Serialize;

use super::BatchOptions;
use crate::dns::DnsReport;
use crate::domain::{DomainReport, Suggestion};
use crate::smtp::{SmtpReport, SmtpVerdict};
use crate::syntax::SyntaxReport;

pub const FLAG_DISPOSABLE: &str = "disposable_email";
pub const FLAG_POPULAR_ACCEPTED: &str = "popular_provider_accepted";
pub const FLAG_CATCH_ALL: &str = "catch_all_domain";
pub const FLAG_SUSPICIOUS_PREFIX: &str = "suspicious";

pub const FAILURE_SYNTAX: &str = "Invalid syntax";
pub const FAILURE_DOMAIN: &str = "Invalid domain";
pub const FAILURE_NO_MAIL_SERVERS: &str = "No mail servers found";
pub const FAILURE_EXCEPTION: &str = "Processing exception";

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMethod {
    SyntaxDomainMx,
    FullValidation,
}

impl ValidationMethod {
    pub fn for_options(options: &BatchOptions) -> Self {
        if options.skip_smtp {
            Self::SyntaxDomainMx
        } else {
            Self::FullValidation
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMetadata {
    pub processing_time_ms: u64,
    pub validation_method: ValidationMethod,
    pub strict_mode: bool,
}

/// Per-stage diagnostics. A stage that never ran stays `None`.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageDetails {
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub syntax: Option<SyntaxReport>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub domain: Option<DomainReport>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub dns: Option<DnsReport>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub smtp: Option<SmtpReport>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub failure_reason: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Caller's address, trimmed.
    pub email: String,
    pub normalized_email: String,
    pub index: usize,
    pub syntax_valid: bool,
    pub domain_valid: bool,
    pub mx_valid: bool,
    #[cfg_attr(
        feature = "with-serde",
        serde(serialize_with = "SmtpVerdict::serialize_nullable")
    )]
    pub smtp_valid: SmtpVerdict,
    pub valid: bool,
    pub confidence: u8,
    pub flags: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub details: StageDetails,
    pub metadata: ResultMetadata,
}

impl ValidationResult {
    pub(crate) fn new(email: &str, index: usize, options: &BatchOptions) -> Self {
        let email = email.trim();
        Self {
            email: email.to_string(),
            normalized_email: email.to_lowercase(),
            index,
            syntax_valid: false,
            domain_valid: false,
            mx_valid: false,
            smtp_valid: SmtpVerdict::Skipped,
            valid: false,
            confidence: 0,
            flags: Vec::new(),
            suggestions: Vec::new(),
            details: StageDetails::default(),
            metadata: ResultMetadata {
                processing_time_ms: 0,
                validation_method: ValidationMethod::for_options(options),
                strict_mode: options.strict_validation,
            },
        }
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    pub fn is_suspicious(&self) -> bool {
        self.flags
            .iter()
            .any(|f| f.starts_with(FLAG_SUSPICIOUS_PREFIX))
    }

    pub(crate) fn fail(&mut self, reason: &str) {
        self.details.failure_reason = Some(reason.to_string());
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub with_suggestions: usize,
    pub disposable: usize,
    pub suspicious: usize,
    pub average_confidence: u8,
    pub processing_time_ms: u64,
}

impl BatchSummary {
    pub fn from_results(results: &[ValidationResult], elapsed: Duration) -> Self {
        let total = results.len();
        let valid = results.iter().filter(|r| r.valid).count();
        let confidence_sum: u64 = results.iter().map(|r| u64::from(r.confidence)).sum();
        let average_confidence = if total == 0 {
            0
        } else {
            (confidence_sum as f64 / total as f64).round() as u8
        };
        Self {
            total,
            valid,
            invalid: total - valid,
            with_suggestions: results.iter().filter(|r| !r.suggestions.is_empty()).count(),
            disposable: results.iter().filter(|r| r.has_flag(FLAG_DISPOSABLE)).count(),
            suspicious: results.iter().filter(|r| r.is_suspicious()).count(),
            average_confidence,
            processing_time_ms: millis(elapsed),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub results: Vec<ValidationResult>,
    pub summary: BatchSummary,
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub api_version: &'static str,
    /// `standard` when SMTP was skipped, else `comprehensive`.
    pub validation_method: &'static str,
    pub rate_limit_remaining: u32,
    pub options: BatchOptions,
}

/// What [`BatchVerifier::submit`](super::BatchVerifier::submit) returns on admission.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub results: Vec<ValidationResult>,
    pub summary: BatchSummary,
    pub metadata: ResponseMetadata,
}

pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
