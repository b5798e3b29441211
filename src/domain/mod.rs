//! Domain typo correction and provider classification.
//!
//! The corrector never rewrites an address. A domain found in the typo
//! table, or within edit distance 2 of a popular provider, is reported as
//! invalid and the correction is returned as a separate suggestion.

mod tables;
mod types;

pub use types::{
    CorrectionSource, DomainReport, Suggestion, SuggestionConfidence, SuggestionKind,
};

use tracing::debug;

use tables::{DISPOSABLE_DOMAINS, DOMAIN_CORRECTIONS, POPULAR_PROVIDERS};

const MAX_TYPO_DISTANCE: usize = 2;
const MIN_SIMILARITY: f64 = 0.7;

pub fn check(normalized_address: &str) -> DomainReport {
    let Some((local, domain)) = normalized_address.split_once('@') else {
        return DomainReport::default();
    };
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() {
        return DomainReport::default();
    }

    let ascii_domain = to_ascii_or_original(&domain);
    let is_disposable = is_disposable(&ascii_domain);
    let is_popular_provider = is_popular_provider(&ascii_domain);
    let base = DomainReport {
        domain: domain.clone(),
        ascii_domain: ascii_domain.clone(),
        is_disposable,
        is_popular_provider,
        ..DomainReport::default()
    };

    if let Some(corrected) = DOMAIN_CORRECTIONS.get(ascii_domain.as_str()) {
        debug!(domain = %ascii_domain, corrected, "typo table match");
        return DomainReport {
            valid: false,
            typo: true,
            suggestion: Some(format!("{local}@{corrected}")),
            confidence: Some(SuggestionConfidence::High),
            source: Some(CorrectionSource::TypoTable),
            ..base
        };
    }

    // ymail.com is one edit from gmail.com; providers never correct to each other.
    let fuzzy = if is_popular_provider {
        None
    } else {
        closest_provider(&ascii_domain)
    };
    if let Some((provider, distance)) = fuzzy {
        debug!(domain = %ascii_domain, provider, distance, "fuzzy provider match");
        return DomainReport {
            valid: false,
            typo: true,
            suggestion: Some(format!("{local}@{provider}")),
            confidence: Some(SuggestionConfidence::High),
            source: Some(CorrectionSource::EditDistance),
            distance: Some(distance),
            ..base
        };
    }

    DomainReport {
        valid: true,
        ..base
    }
}

pub fn is_popular_provider(domain: &str) -> bool {
    POPULAR_PROVIDERS.contains(domain)
}

pub fn is_disposable(domain: &str) -> bool {
    DISPOSABLE_DOMAINS.contains(domain)
}

/// IDNA conversion for comparison; any failure keeps the input as-is.
pub(crate) fn to_ascii_or_original(domain: &str) -> String {
    match idna::domain_to_ascii(domain) {
        Ok(ascii) if !ascii.is_empty() => ascii,
        _ => domain.to_string(),
    }
}

/// Closest popular provider within the typo thresholds. Exact matches are
/// the provider itself and never count; ties keep the first provider.
fn closest_provider(domain: &str) -> Option<(&'static str, usize)> {
    let mut best: Option<(&'static str, usize)> = None;
    for provider in POPULAR_PROVIDERS.iter() {
        let distance = textdistance::str::levenshtein(domain, provider);
        if distance == 0 || distance > MAX_TYPO_DISTANCE {
            continue;
        }
        if similarity(domain, provider, distance) <= MIN_SIMILARITY {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((*provider, distance));
        }
    }
    best
}

fn similarity(a: &str, b: &str, distance: usize) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - distance as f64 / longest as f64
}

#[cfg(test)]
mod tests;
