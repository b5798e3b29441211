use std::future::Future;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use trust_dns_resolver::{TokioAsyncResolver, error::ResolveError, system_conf::read_system_conf};

use super::{DnsError, MxRecord};

/// Record lookups needed by the DNS stage.
pub trait DnsLookup: Send + Sync + 'static {
    fn lookup_mx(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<MxRecord>, ResolveError>> + Send;

    fn lookup_ipv4(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<Ipv4Addr>, ResolveError>> + Send;
}

/// Async resolver built from the host's resolver configuration.
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    /// Reads the system configuration and applies `timeout` to each query.
    pub fn from_system_conf(timeout: Duration) -> Result<Self, DnsError> {
        let (config, mut opts) = read_system_conf().map_err(DnsError::resolver_init)?;
        opts.timeout = timeout;
        Ok(Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        })
    }
}

impl DnsLookup for SystemResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = self.inner.mx_lookup(domain).await?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }

    async fn lookup_ipv4(&self, domain: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let lookup = self.inner.lookup_ip(domain).await?;
        Ok(lookup
            .iter()
            .filter_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect())
    }
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

/// Sorts by preference (most preferred first) and drops duplicates.
pub(crate) fn sort_records(mut records: Vec<MxRecord>) -> Vec<MxRecord> {
    records.sort();
    records.dedup();
    records
}
