//! MX/A resolution with a time-boxed in-memory cache.
//!
//! [`DnsProbe::check`] is cache-first. On a miss it queries MX records and
//! falls back to A records; both failing yields an invalid report, except
//! for popular providers where a lenient report is substituted. Only valid
//! reports are written to the cache.

mod cache;
mod error;
mod resolver;
mod types;

pub use cache::{DEFAULT_DNS_TTL, DnsCache};
pub use error::DnsError;
pub use resolver::{DnsLookup, SystemResolver};
pub use types::{DnsReport, LookupAttempts, MxRecord, RecordKind};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{is_popular_provider, to_ascii_or_original};
use resolver::sort_records;

pub struct DnsProbe<R> {
    resolver: Arc<R>,
    cache: Arc<DnsCache>,
}

impl<R> Clone for DnsProbe<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<R: DnsLookup> DnsProbe<R> {
    pub fn new(resolver: Arc<R>, cache: Arc<DnsCache>) -> Self {
        Self { resolver, cache }
    }

    pub fn cache(&self) -> &DnsCache {
        &self.cache
    }

    pub async fn check(&self, normalized_address: &str) -> DnsReport {
        let Some((_, domain)) = normalized_address.rsplit_once('@') else {
            return DnsReport::no_domain();
        };
        let domain = domain.trim().to_lowercase();
        if domain.is_empty() {
            return DnsReport::no_domain();
        }
        let ascii = to_ascii_or_original(&domain);

        let slot = self.cache.slot(&ascii);
        let mut entry = slot.lock().await;
        if let Some(report) = self.cache.fresh_report(entry.as_ref()) {
            debug!(domain = %ascii, "dns cache hit");
            return report;
        }

        let report = self.resolve(&ascii).await;
        if report.valid {
            self.cache.store(&mut entry, &report);
        }
        report
    }

    async fn resolve(&self, domain: &str) -> DnsReport {
        let mut attempts = LookupAttempts::default();

        match self.resolver.lookup_mx(domain).await {
            Ok(records) if !records.is_empty() => {
                let records = sort_records(records);
                debug!(domain, count = records.len(), "mx records found");
                return DnsReport::mx(domain, records);
            }
            Ok(_) => attempts.mx_error = Some("no MX records".to_string()),
            Err(err) => attempts.mx_error = Some(err.to_string()),
        }

        match self.resolver.lookup_ipv4(domain).await {
            Ok(addresses) if !addresses.is_empty() => {
                debug!(domain, count = addresses.len(), "falling back to A records");
                return DnsReport::a_fallback(domain, addresses, attempts);
            }
            Ok(_) => attempts.a_error = Some("no A records".to_string()),
            Err(err) => attempts.a_error = Some(err.to_string()),
        }

        if is_popular_provider(domain) {
            warn!(domain, ?attempts, "dns lookups failed for popular provider, assuming valid");
            return DnsReport::lenient(domain, attempts);
        }

        debug!(domain, ?attempts, "no mail-capable records");
        DnsReport::failed(domain, attempts)
    }
}

#[cfg(test)]
mod tests;
