//! Batch fan-out and the request boundary.
//!
//! [`BatchVerifier::run`] verifies every non-blank address as its own task,
//! bounded by a semaphore, and waits for all of them. A task that panics
//! becomes an invalid result for that address only. [`BatchVerifier::submit`]
//! applies the rate limit and batch cap before running anything.

mod error;
mod item;
mod options;
mod request;
mod types;

pub use error::{BatchError, StageError};
pub use options::{
    BatchOptions, DEFAULT_MAX_IN_FLIGHT, DEFAULT_RESOLVER_TIMEOUT, DEFAULT_SMTP_TIMEOUT_MS,
    MAX_BATCH_SIZE, VerifierConfig,
};
pub use request::BatchRequest;
pub use types::{
    BatchOutcome, BatchSummary, FAILURE_DOMAIN, FAILURE_EXCEPTION, FAILURE_NO_MAIL_SERVERS,
    FAILURE_SYNTAX, FLAG_CATCH_ALL, FLAG_DISPOSABLE, FLAG_POPULAR_ACCEPTED, ResponseMetadata,
    ResultMetadata, StageDetails, SubmitResponse, ValidationMethod, ValidationResult,
};

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{Instrument, info, info_span, warn};

use crate::dns::{DnsCache, DnsError, DnsLookup, DnsProbe, SystemResolver};
use crate::ratelimit::RateLimiter;
use crate::smtp::{MailboxProbe, SmtpProbe, SmtpProber};

const API_VERSION: &str = "2.1";

pub struct BatchVerifier<R = SystemResolver, P = SmtpProber> {
    config: VerifierConfig,
    dns: DnsProbe<R>,
    smtp: SmtpProbe<P>,
    limiter: RateLimiter,
    in_flight: Arc<Semaphore>,
}

impl BatchVerifier {
    /// Production wiring: system resolver and live SMTP prober.
    pub fn new(config: VerifierConfig) -> Result<Self, DnsError> {
        let resolver = SystemResolver::from_system_conf(config.resolver_timeout)?;
        let prober = SmtpProber::new(config.smtp.clone());
        Ok(Self::with_components(config, resolver, prober))
    }
}

impl<R: DnsLookup, P: MailboxProbe> BatchVerifier<R, P> {
    pub fn with_components(config: VerifierConfig, resolver: R, prober: P) -> Self {
        let cache = Arc::new(DnsCache::new(config.dns_ttl));
        Self {
            dns: DnsProbe::new(Arc::new(resolver), cache),
            smtp: SmtpProbe::new(Arc::new(prober)),
            limiter: RateLimiter::new(),
            in_flight: Arc::new(Semaphore::new(config.max_in_flight.max(1))),
            config,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn dns_cache(&self) -> &DnsCache {
        self.dns.cache()
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Verifies a batch. Blank entries are dropped and at most
    /// `max_batch` addresses are processed; `index` refers to the filtered list.
    pub async fn run(&self, addresses: &[String], options: &BatchOptions) -> BatchOutcome {
        let started = Instant::now();
        let survivors: Vec<String> = addresses
            .iter()
            .map(|raw| raw.trim())
            .filter(|trimmed| !trimmed.is_empty())
            .take(self.config.max_batch)
            .map(str::to_owned)
            .collect();
        info!(count = survivors.len(), skip_smtp = options.skip_smtp, "batch started");

        let handles = survivors.iter().enumerate().map(|(index, email)| {
            let dns = self.dns.clone();
            let smtp = self.smtp.clone();
            let options = options.clone();
            let email = email.clone();
            let in_flight = Arc::clone(&self.in_flight);
            let span = info_span!("verify", index, email = %email);
            tokio::spawn(
                async move {
                    let _permit = in_flight.acquire_owned().await.ok();
                    item::verify_address(&dns, &smtp, &email, index, &options).await
                }
                .instrument(span),
            )
        });
        let settled = join_all(handles).await;

        let results: Vec<ValidationResult> = settled
            .into_iter()
            .zip(survivors.iter())
            .enumerate()
            .map(|(index, (joined, email))| match joined {
                Ok(result) => result,
                Err(err) => failed_result(email, index, options, StageError::from(err)),
            })
            .collect();

        let summary = BatchSummary::from_results(&results, started.elapsed());
        info!(
            total = summary.total,
            valid = summary.valid,
            average_confidence = summary.average_confidence,
            "batch finished"
        );
        BatchOutcome { results, summary }
    }

    /// Admits `request` for `client_id`, then runs it.
    pub async fn submit(
        &self,
        client_id: &str,
        request: BatchRequest,
    ) -> Result<SubmitResponse, BatchError> {
        let decision = self
            .limiter
            .admit(client_id, self.config.rate_limit, self.config.rate_window);
        if !decision.allowed {
            return Err(BatchError::RateLimited {
                limit: decision.limit,
                reset_in: decision.reset_in,
            });
        }
        if request.submitted > self.config.max_batch {
            return Err(BatchError::TooManyAddresses {
                count: request.submitted,
                max: self.config.max_batch,
            });
        }

        let BatchRequest { emails, options, .. } = request;
        let outcome = self.run(&emails, &options).await;
        Ok(SubmitResponse {
            results: outcome.results,
            summary: outcome.summary,
            metadata: ResponseMetadata {
                api_version: API_VERSION,
                validation_method: if options.skip_smtp {
                    "standard"
                } else {
                    "comprehensive"
                },
                rate_limit_remaining: decision.remaining,
                options,
            },
        })
    }
}

fn failed_result(
    email: &str,
    index: usize,
    options: &BatchOptions,
    err: StageError,
) -> ValidationResult {
    warn!(index, error = %err, "address task failed");
    let mut result = ValidationResult::new(email, index, options);
    result.fail(FAILURE_EXCEPTION);
    result.details.error = Some(format!("Processing error: {err}"));
    result
}
