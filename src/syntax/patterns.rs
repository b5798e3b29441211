use once_cell::sync::Lazy;
use regex::Regex;

use super::types::SuspiciousPattern;

/// Anchored address pattern: RFC 5322 local-part charset, then at least two
/// DNS-label-shaped domain labels (1..=63 chars, no leading/trailing hyphen).
static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("address pattern is a valid regex")
});

static SUSPICIOUS_PATTERNS: Lazy<Vec<(SuspiciousPattern, Regex)>> = Lazy::new(|| {
    [
        (SuspiciousPattern::TestPrefix, r"(?i)^test.*@"),
        (SuspiciousPattern::TempPrefix, r"(?i)^temp.*@"),
        (SuspiciousPattern::NoReply, r"(?i)^no.*reply@"),
        (SuspiciousPattern::NumericLocal, r"^\d+@"),
        (SuspiciousPattern::ShortLocal, r"^.{1,2}@"),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        (
            kind,
            Regex::new(pattern).expect("suspicious pattern is a valid regex"),
        )
    })
    .collect()
});

pub(crate) fn matches_address_pattern(address: &str) -> bool {
    ADDRESS_PATTERN.is_match(address)
}

pub(crate) fn suspicious_matches(address: &str) -> Vec<SuspiciousPattern> {
    SUSPICIOUS_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(address))
        .map(|(kind, _)| *kind)
        .collect()
}
