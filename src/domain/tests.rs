use proptest::prelude::*;

use super::tables::{DOMAIN_CORRECTIONS, POPULAR_PROVIDERS};
use super::*;

#[test]
fn typo_table_match_is_high_confidence() {
    let report = check("user@gmial.com");
    assert!(!report.valid);
    assert!(report.typo);
    assert_eq!(report.suggestion.as_deref(), Some("user@gmail.com"));
    assert_eq!(report.confidence, Some(SuggestionConfidence::High));
    assert_eq!(report.source, Some(CorrectionSource::TypoTable));
}

#[test]
fn fuzzy_match_against_providers() {
    let report = check("jane@hotmal.com");
    assert!(!report.valid);
    assert_eq!(report.suggestion.as_deref(), Some("jane@hotmail.com"));
    assert_eq!(report.distance, Some(1));
    assert_eq!(report.source, Some(CorrectionSource::EditDistance));
}

#[test]
fn fuzzy_tie_keeps_first_provider() {
    // One substitution away from both gmail.com and ymail.com.
    let report = check("x@xmail.com");
    assert_eq!(report.suggestion.as_deref(), Some("x@gmail.com"));
}

#[test]
fn provider_itself_is_not_a_typo() {
    let report = check("user@gmail.com");
    assert!(report.valid);
    assert!(!report.typo);
    assert!(report.suggestion.is_none());
    assert!(report.is_popular_provider);
}

#[test]
fn unrelated_domain_is_valid() {
    let report = check("someone@example.org");
    assert!(report.valid);
    assert!(!report.is_popular_provider);
    assert!(!report.is_disposable);
    assert!(report.to_suggestion().is_none());
}

#[test]
fn disposable_domain_is_flagged_not_rejected() {
    let report = check("burner@mailinator.com");
    assert!(report.valid);
    assert!(report.is_disposable);
}

#[test]
fn idn_domain_compared_in_ascii_form() {
    let report = check("user@exämple.com");
    assert!(report.valid);
    assert_eq!(report.domain, "exämple.com");
    assert!(report.ascii_domain.starts_with("xn--"));
}

#[test]
fn missing_domain_is_invalid_without_suggestion() {
    let report = check("user@");
    assert!(!report.valid);
    assert!(report.suggestion.is_none());
    let report = check("no-at-sign");
    assert!(!report.valid);
}

#[test]
fn suggestion_conversion() {
    let suggestion = check("user@yahooo.com").to_suggestion().expect("suggestion");
    assert_eq!(suggestion.kind, SuggestionKind::TypoCorrection);
    assert_eq!(suggestion.corrected_address, "user@yahoo.com");
    assert_eq!(suggestion.confidence, SuggestionConfidence::High);
}

#[test]
fn table_corrections_do_not_cycle() {
    for (typo, corrected) in DOMAIN_CORRECTIONS.entries() {
        let first = check(&format!("user@{typo}"));
        let suggested = first.suggestion.expect("table entry yields a suggestion");
        assert_eq!(suggested, format!("user@{corrected}"));
        let second = check(&suggested);
        assert!(second.valid, "{suggested} should be accepted");
        assert!(second.suggestion.is_none());
    }
}

#[test]
fn providers_are_accepted_as_is() {
    for provider in POPULAR_PROVIDERS.iter() {
        let report = check(&format!("user@{provider}"));
        assert!(report.valid, "{provider}");
        assert!(report.is_popular_provider);
    }
}

proptest! {
    #[test]
    fn corrected_address_never_suggests_again(
        sld in "[a-z]{1,10}",
        tld in prop::sample::select(vec!["com", "co", "cm", "net", "org"]),
    ) {
        let report = check(&format!("user@{sld}.{tld}"));
        if let Some(suggested) = report.suggestion {
            let again = check(&suggested);
            prop_assert!(again.valid);
            prop_assert!(again.suggestion.is_none());
        }
    }
}

#[test]
fn provider_close_to_another_provider_stays_valid() {
    let report = check("user@ymail.com");
    assert!(report.valid);
    assert!(report.suggestion.is_none());
}
