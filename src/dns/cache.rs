use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::Instant;

use super::DnsReport;

pub const DEFAULT_DNS_TTL: Duration = Duration::from_millis(300_000);

#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub report: DnsReport,
    pub stored_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

pub(crate) type CacheSlot = Arc<AsyncMutex<Option<CacheEntry>>>;

/// Per-domain DNS report cache.
///
/// The map lock is only held to fetch or create a domain's slot; the slot's
/// own async lock covers the read-check-probe-write sequence, so probes for
/// the same domain are serialized while other domains proceed.
#[derive(Debug)]
pub struct DnsCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, CacheSlot>>,
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new(DEFAULT_DNS_TTL)
    }
}

impl DnsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn slot(&self, domain: &str) -> CacheSlot {
        let mut slots = self.slots.lock();
        slots
            .entry(domain.to_ascii_lowercase())
            .or_default()
            .clone()
    }

    /// Fresh cached report for `slot`, tagged as cached.
    pub(crate) fn fresh_report(&self, entry: Option<&CacheEntry>) -> Option<DnsReport> {
        let entry = entry?;
        if !entry.is_fresh(self.ttl, Instant::now()) {
            return None;
        }
        let mut report = entry.report.clone();
        report.cached = true;
        Some(report)
    }

    pub(crate) fn store(&self, entry: &mut Option<CacheEntry>, report: &DnsReport) {
        let mut stored = report.clone();
        stored.cached = false;
        *entry = Some(CacheEntry {
            report: stored,
            stored_at: Instant::now(),
        });
    }

    /// Number of domains with a report younger than the TTL.
    pub fn fresh_len(&self) -> usize {
        let now = Instant::now();
        let slots = self.slots.lock();
        slots
            .values()
            .filter(|slot| {
                slot.try_lock()
                    .ok()
                    .and_then(|guard| guard.as_ref().map(|e| e.is_fresh(self.ttl, now)))
                    .unwrap_or(false)
            })
            .count()
    }
}
