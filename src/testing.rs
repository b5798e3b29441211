//! In-memory resolver and prober used by unit tests.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use trust_dns_resolver::error::ResolveError;

use crate::dns::{DnsLookup, MxRecord};
use crate::smtp::{MailboxProbe, SmtpOutcome, SmtpProbeError, SmtpReply};

#[derive(Default)]
pub(crate) struct StubResolver {
    mx: HashMap<String, Result<Vec<MxRecord>, String>>,
    a: HashMap<String, Result<Vec<Ipv4Addr>, String>>,
    delay: Option<Duration>,
    mx_calls: AtomicUsize,
}

impl StubResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_mx(mut self, domain: &str, records: Vec<MxRecord>) -> Self {
        self.mx.insert(domain.to_string(), Ok(records));
        self
    }

    pub(crate) fn with_mx_error(mut self, domain: &str, message: &str) -> Self {
        self.mx.insert(domain.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn with_a(mut self, domain: &str, addresses: Vec<Ipv4Addr>) -> Self {
        self.a.insert(domain.to_string(), Ok(addresses));
        self
    }

    pub(crate) fn with_a_error(mut self, domain: &str, message: &str) -> Self {
        self.a.insert(domain.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn mx_calls(&self) -> usize {
        self.mx_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn answer<T: Clone>(
    table: &HashMap<String, Result<Vec<T>, String>>,
    domain: &str,
) -> Result<Vec<T>, ResolveError> {
    match table.get(domain) {
        Some(Ok(values)) => Ok(values.clone()),
        Some(Err(message)) => Err(ResolveError::from(message.clone())),
        None => Err(ResolveError::from(format!("no record found for {domain}"))),
    }
}

impl DnsLookup for StubResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        self.mx_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        answer(&self.mx, domain)
    }

    async fn lookup_ipv4(&self, domain: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        self.pause().await;
        answer(&self.a, domain)
    }
}

/// Scripted RCPT behaviour for one address.
#[derive(Debug, Clone, Copy)]
pub(crate) enum StubReply {
    Code(u16),
    Refused,
    Hang,
    Panic,
}

pub(crate) struct StubProber {
    replies: HashMap<String, StubReply>,
    fallback: StubReply,
    calls: AtomicUsize,
}

impl StubProber {
    /// Every address gets `fallback` unless scripted otherwise.
    pub(crate) fn new(fallback: StubReply) -> Self {
        Self {
            replies: HashMap::new(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_reply(mut self, address: &str, reply: StubReply) -> Self {
        self.replies.insert(address.to_string(), reply);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MailboxProbe for StubProber {
    async fn probe(&self, address: &str, exchange: &str) -> Result<SmtpOutcome, SmtpProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.get(address).copied().unwrap_or(self.fallback);
        match reply {
            StubReply::Code(code) => Ok(SmtpOutcome {
                rcpt: SmtpReply {
                    code,
                    message: "stub".to_string(),
                },
                catch_all: None,
                transcript: vec![format!("[{exchange}] C: RCPT TO:<{address}>")],
            }),
            StubReply::Refused => Err(SmtpProbeError::Protocol("stub refused".to_string())),
            StubReply::Hang => std::future::pending().await,
            StubReply::Panic => panic!("stub prober panicked for {address}"),
        }
    }
}
