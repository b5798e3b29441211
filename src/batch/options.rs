use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::dns::DEFAULT_DNS_TTL;
use crate::ratelimit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
use crate::smtp::SmtpProbeOptions;

pub const MAX_BATCH_SIZE: usize = 100;
pub const DEFAULT_SMTP_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_MAX_IN_FLIGHT: usize = 25;
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-request switches, as accepted on the JSON boundary.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase", default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    #[cfg_attr(feature = "with-serde", serde(rename = "skipSMTP"))]
    pub skip_smtp: bool,
    pub check_disposable: bool,
    pub strict_validation: bool,
    /// SMTP deadline in milliseconds.
    pub timeout: u64,
    pub include_suggestions: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            skip_smtp: false,
            check_disposable: true,
            strict_validation: false,
            timeout: DEFAULT_SMTP_TIMEOUT_MS,
            include_suggestions: true,
        }
    }
}

impl BatchOptions {
    pub fn smtp_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

/// Engine-wide settings, fixed for the lifetime of a [`BatchVerifier`](super::BatchVerifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    pub max_batch: usize,
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub dns_ttl: Duration,
    pub resolver_timeout: Duration,
    pub max_in_flight: usize,
    pub smtp: SmtpProbeOptions,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_batch: MAX_BATCH_SIZE,
            rate_limit: DEFAULT_MAX_REQUESTS,
            rate_window: DEFAULT_WINDOW,
            dns_ttl: DEFAULT_DNS_TTL,
            resolver_timeout: DEFAULT_RESOLVER_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            smtp: SmtpProbeOptions::default(),
        }
    }
}
