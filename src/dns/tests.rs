use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use super::resolver::normalize_exchange;
use super::*;
use crate::testing::StubResolver;

fn probe(stub: StubResolver) -> (DnsProbe<StubResolver>, Arc<StubResolver>) {
    let stub = Arc::new(stub);
    let probe = DnsProbe::new(Arc::clone(&stub), Arc::new(DnsCache::default()));
    (probe, stub)
}

#[tokio::test]
async fn mx_records_sorted_and_deduped() {
    let (probe, _) = probe(StubResolver::new().with_mx(
        "example.com",
        vec![
            MxRecord::new(20, "mx2.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(30, "mx3.example.com"),
        ],
    ));

    let report = probe.check("user@example.com").await;
    assert!(report.valid);
    assert_eq!(report.kind, Some(RecordKind::Mx));
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[0].preference, 10);
    assert_eq!(report.primary_mx.as_deref(), Some("mx1.example.com"));
    assert_eq!(report.mail_host(), Some("mx1.example.com"));
    assert!(!report.fallback);
    assert!(!report.cached);
}

#[tokio::test]
async fn falls_back_to_a_records() {
    let (probe, _) = probe(
        StubResolver::new()
            .with_mx_error("example.net", "no record found")
            .with_a("example.net", vec![Ipv4Addr::new(192, 0, 2, 10)]),
    );

    let report = probe.check("user@example.net").await;
    assert!(report.valid);
    assert!(report.fallback);
    assert_eq!(report.kind, Some(RecordKind::A));
    assert_eq!(report.addresses, vec![Ipv4Addr::new(192, 0, 2, 10)]);
    assert!(report.attempts.mx_error.is_some());
    assert_eq!(report.mail_host(), Some("example.net"));
}

#[tokio::test]
async fn empty_mx_answer_also_falls_back() {
    let (probe, _) = probe(
        StubResolver::new()
            .with_mx("example.net", Vec::new())
            .with_a("example.net", vec![Ipv4Addr::new(192, 0, 2, 11)]),
    );
    let report = probe.check("user@example.net").await;
    assert_eq!(report.kind, Some(RecordKind::A));
    assert_eq!(report.attempts.mx_error.as_deref(), Some("no MX records"));
}

#[tokio::test]
async fn both_lookups_failing_is_invalid_and_not_cached() {
    let (probe, stub) = probe(
        StubResolver::new()
            .with_mx_error("nowhere.test", "connection refused")
            .with_a_error("nowhere.test", "connection refused"),
    );

    let first = probe.check("user@nowhere.test").await;
    assert!(!first.valid);
    assert!(first.attempts.mx_error.is_some());
    assert!(first.attempts.a_error.is_some());
    assert_eq!(first.mail_host(), None);

    let second = probe.check("user@nowhere.test").await;
    assert!(!second.cached);
    assert_eq!(stub.mx_calls(), 2);
}

#[tokio::test]
async fn popular_provider_failure_is_lenient_and_cached() {
    let (probe, stub) = probe(StubResolver::new());

    let first = probe.check("user@gmail.com").await;
    assert!(first.valid);
    assert!(first.fallback);
    assert!(first.kind.is_none());
    assert!(first.details.contains("assuming valid"));
    assert_eq!(first.mail_host(), Some("gmail.com"));

    let second = probe.check("other@gmail.com").await;
    assert!(second.cached);
    assert_eq!(stub.mx_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn cache_hit_within_ttl_and_requery_after() {
    let (probe, stub) = probe(
        StubResolver::new().with_mx("example.com", vec![MxRecord::new(5, "mx.example.com")]),
    );

    let first = probe.check("a@example.com").await;
    tokio::time::advance(Duration::from_millis(299_000)).await;
    let mut second = probe.check("b@EXAMPLE.com").await;
    assert!(second.cached);
    second.cached = false;
    assert_eq!(first, second);
    assert_eq!(stub.mx_calls(), 1);
    assert_eq!(probe.cache().fresh_len(), 1);

    tokio::time::advance(Duration::from_millis(1_001)).await;
    let third = probe.check("c@example.com").await;
    assert!(!third.cached);
    assert_eq!(stub.mx_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn concurrent_probes_of_one_domain_resolve_once() {
    let (probe, stub) = probe(
        StubResolver::new()
            .with_mx("example.com", vec![MxRecord::new(5, "mx.example.com")])
            .with_delay(Duration::from_millis(50)),
    );

    let (a, b) = tokio::join!(probe.check("a@example.com"), probe.check("b@example.com"));
    assert!(a.valid && b.valid);
    assert_eq!(stub.mx_calls(), 1);
    assert!(a.cached ^ b.cached);
}

#[tokio::test]
async fn address_without_domain() {
    let (probe, stub) = probe(StubResolver::new());
    let report = probe.check("user@").await;
    assert!(!report.valid);
    assert_eq!(report.details, "No domain found");
    assert_eq!(stub.mx_calls(), 0);
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
}
