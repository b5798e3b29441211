//! Live RCPT-level mailbox probing.
//!
//! [`SmtpProbe::check`] runs one handshake through a [`MailboxProbe`] under
//! a hard deadline and folds the result into a three-way [`SmtpVerdict`].

mod error;
mod options;
mod probe;
mod session;
mod types;
mod util;

pub use error::SmtpProbeError;
pub use options::SmtpProbeOptions;
pub use probe::{MailboxProbe, SmtpProber};
pub use types::{SmtpOutcome, SmtpReply, SmtpReport, SmtpVerdict};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{is_popular_provider, to_ascii_or_original};

pub struct SmtpProbe<P> {
    prober: Arc<P>,
}

impl<P> Clone for SmtpProbe<P> {
    fn clone(&self) -> Self {
        Self {
            prober: Arc::clone(&self.prober),
        }
    }
}

impl<P: MailboxProbe> SmtpProbe<P> {
    pub fn new(prober: Arc<P>) -> Self {
        Self { prober }
    }

    /// Probes `normalized_address` at `exchange`, giving up after `timeout`.
    pub async fn check(&self, normalized_address: &str, exchange: &str, timeout: Duration) -> SmtpReport {
        let domain = normalized_address
            .rsplit_once('@')
            .map(|(_, domain)| to_ascii_or_original(domain))
            .unwrap_or_default();
        let popular = is_popular_provider(&domain);

        let mut report = SmtpReport {
            exchange: Some(exchange.to_string()),
            popular_provider: popular,
            ..SmtpReport::default()
        };

        match tokio::time::timeout(timeout, self.prober.probe(normalized_address, exchange)).await {
            Err(_) => {
                debug!(exchange, ?timeout, "smtp probe timed out");
                report.verdict = SmtpVerdict::Inconclusive;
                report.timeout = true;
                report.details = "SMTP check timeout - inconclusive".to_string();
            }
            Ok(Err(err)) => {
                warn!(exchange, error = %err, "smtp probe failed");
                if popular {
                    report.verdict = SmtpVerdict::Inconclusive;
                    report.details = format!("SMTP check failed for popular provider: {err}");
                } else {
                    report.verdict = SmtpVerdict::Fail;
                    report.details = format!("SMTP check failed: {err}");
                }
                report.error = Some(err.to_string());
            }
            Ok(Ok(outcome)) => {
                report.verdict = verdict_for(&outcome.rcpt);
                report.details = match report.verdict {
                    SmtpVerdict::Pass => "SMTP verification passed".to_string(),
                    SmtpVerdict::Fail => "SMTP verification failed".to_string(),
                    _ => format!("SMTP verification inconclusive ({})", outcome.rcpt.code),
                };
                report.catch_all = outcome.catch_all;
                report.transcript = outcome.transcript;
                report.reply = Some(outcome.rcpt);
            }
        }
        report
    }
}

fn verdict_for(reply: &SmtpReply) -> SmtpVerdict {
    match reply {
        r if r.is_positive_completion() => SmtpVerdict::Pass,
        r if r.is_permanent_failure() => SmtpVerdict::Fail,
        r if r.is_transient_failure() => SmtpVerdict::Inconclusive,
        // 1xx or 3xx to RCPT is off-protocol.
        _ => SmtpVerdict::Inconclusive,
    }
}
