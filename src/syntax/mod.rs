//! Structural and pattern-based address screening.
//!
//! [`check`] accepts an address when either the grammar validator or the
//! anchored pattern accepts it. Suspicious-looking local parts are scored
//! but never block validity on their own.

mod grammar;
mod patterns;
mod types;

pub use types::{SuspiciousPattern, SyntaxChecks, SyntaxReport};

use grammar::grammar_violations;
use patterns::{matches_address_pattern, suspicious_matches};

pub const MIN_ADDRESS_LEN: usize = 3;
pub const MAX_ADDRESS_LEN: usize = 320;

pub fn check(address: &str) -> SyntaxReport {
    let input = address.trim();

    if input.is_empty() {
        return SyntaxReport::rejected("Invalid input type");
    }

    // UTF-16 code units, so astral characters count twice.
    let len = input.encode_utf16().count();
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) {
        return SyntaxReport::rejected("Invalid length");
    }

    if input.matches('@').count() != 1 {
        return SyntaxReport::rejected("Invalid @ symbol count");
    }

    let grammar_reasons = grammar_violations(input);
    let validations = SyntaxChecks {
        grammar: grammar_reasons.is_empty(),
        pattern: matches_address_pattern(input),
    };
    let suspicious_patterns = suspicious_matches(input);
    let valid = validations.grammar || validations.pattern;

    SyntaxReport {
        valid,
        reason: if valid {
            "Valid syntax".to_string()
        } else {
            "Syntax validation failed".to_string()
        },
        suspicious_score: u8::try_from(suspicious_patterns.len()).unwrap_or(u8::MAX),
        suspicious_patterns,
        validations: Some(validations),
        grammar_reasons,
    }
}
