#![forbid(unsafe_code)]
//! mailscreen: batch e-mail deliverability screening.
//!
//! Each address goes through syntax checks, typo correction, MX/A
//! resolution and an optional SMTP RCPT probe, then gets a 0-100
//! confidence score. [`BatchVerifier`] runs a whole batch concurrently.

pub mod batch;
pub mod dns;
pub mod domain;
pub mod ratelimit;
pub mod scoring;
pub mod smtp;
pub mod syntax;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{
    BatchError, BatchOptions, BatchOutcome, BatchRequest, BatchSummary, BatchVerifier,
    StageError, SubmitResponse, ValidationResult, VerifierConfig,
};
pub use dns::{DnsCache, DnsError, DnsLookup, DnsProbe, DnsReport, MxRecord, SystemResolver};
pub use domain::{DomainReport, Suggestion};
pub use ratelimit::{RateDecision, RateLimiter};
pub use scoring::{Assessment, Signals};
pub use smtp::{
    MailboxProbe, SmtpProbe, SmtpProbeError, SmtpProbeOptions, SmtpProber, SmtpReport,
    SmtpVerdict,
};
pub use syntax::SyntaxReport;
