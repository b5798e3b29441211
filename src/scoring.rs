//! Weighted confidence scoring and the final accept/reject decision.

use crate::smtp::SmtpVerdict;

pub const SYNTAX_WEIGHT: u8 = 30;
pub const DOMAIN_WEIGHT: u8 = 30;
pub const MX_WEIGHT: u8 = 25;
pub const SMTP_PASS_WEIGHT: u8 = 15;
pub const SMTP_INCONCLUSIVE_WEIGHT: u8 = 10;

pub const NORMAL_THRESHOLD: u8 = 70;
pub const STRICT_THRESHOLD: u8 = 90;

/// The four validity signals plus the provider classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    pub syntax: bool,
    pub domain: bool,
    pub mx: bool,
    pub smtp: SmtpVerdict,
    pub popular_provider: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub confidence: u8,
    pub valid: bool,
    /// Set when the popular-provider rule decided `valid`.
    pub popular_override: bool,
}

pub fn score(syntax: bool, domain: bool, mx: bool, smtp: SmtpVerdict) -> u8 {
    let mut total = 0;
    if syntax {
        total += SYNTAX_WEIGHT;
    }
    if domain {
        total += DOMAIN_WEIGHT;
    }
    if mx {
        total += MX_WEIGHT;
    }
    total
        + match smtp {
            SmtpVerdict::Pass => SMTP_PASS_WEIGHT,
            SmtpVerdict::Inconclusive => SMTP_INCONCLUSIVE_WEIGHT,
            SmtpVerdict::Fail | SmtpVerdict::Skipped => 0,
        }
}

pub fn assess(signals: &Signals, strict: bool) -> Assessment {
    let confidence = score(signals.syntax, signals.domain, signals.mx, signals.smtp);
    if strict {
        return Assessment {
            confidence,
            valid: confidence >= STRICT_THRESHOLD,
            popular_override: false,
        };
    }

    let popular_override =
        signals.popular_provider && signals.syntax && signals.domain && signals.mx;
    Assessment {
        confidence,
        valid: popular_override || confidence >= NORMAL_THRESHOLD,
        popular_override,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signals(syntax: bool, domain: bool, mx: bool, smtp: SmtpVerdict) -> Signals {
        Signals {
            syntax,
            domain,
            mx,
            smtp,
            popular_provider: false,
        }
    }

    #[test]
    fn weights_add_up() {
        assert_eq!(score(true, true, true, SmtpVerdict::Pass), 100);
        assert_eq!(score(true, true, true, SmtpVerdict::Inconclusive), 95);
        assert_eq!(score(true, true, true, SmtpVerdict::Skipped), 85);
        assert_eq!(score(true, true, true, SmtpVerdict::Fail), 85);
        assert_eq!(score(true, false, false, SmtpVerdict::Skipped), 30);
        assert_eq!(score(false, false, false, SmtpVerdict::Skipped), 0);
    }

    #[test]
    fn thresholds() {
        let ok = assess(&signals(true, true, true, SmtpVerdict::Skipped), false);
        assert!(ok.valid);
        assert!(!ok.popular_override);

        let strict = assess(&signals(true, true, true, SmtpVerdict::Skipped), true);
        assert_eq!(strict.confidence, 85);
        assert!(!strict.valid);

        let strict_pass = assess(&signals(true, true, true, SmtpVerdict::Inconclusive), true);
        assert!(strict_pass.valid);

        let no_mx = assess(&signals(true, true, false, SmtpVerdict::Skipped), false);
        assert_eq!(no_mx.confidence, 60);
        assert!(!no_mx.valid);
    }

    #[test]
    fn popular_provider_override_is_normal_mode_only() {
        let mut s = signals(true, true, true, SmtpVerdict::Fail);
        s.popular_provider = true;

        let normal = assess(&s, false);
        assert!(normal.valid);
        assert!(normal.popular_override);

        let strict = assess(&s, true);
        assert!(!strict.valid);
        assert!(!strict.popular_override);

        s.mx = false;
        let without_mx = assess(&s, false);
        assert!(!without_mx.popular_override);
        assert!(!without_mx.valid);
    }

    fn verdict() -> impl Strategy<Value = SmtpVerdict> {
        prop_oneof![
            Just(SmtpVerdict::Pass),
            Just(SmtpVerdict::Fail),
            Just(SmtpVerdict::Inconclusive),
            Just(SmtpVerdict::Skipped),
        ]
    }

    proptest! {
        #[test]
        fn confidence_in_range_and_valid_is_a_function_of_it(
            syntax in any::<bool>(),
            domain in any::<bool>(),
            mx in any::<bool>(),
            popular in any::<bool>(),
            strict in any::<bool>(),
            smtp in verdict(),
        ) {
            let s = Signals { syntax, domain, mx, smtp, popular_provider: popular };
            let a = assess(&s, strict);
            prop_assert!(a.confidence <= 100);
            if !a.popular_override {
                let threshold = if strict { STRICT_THRESHOLD } else { NORMAL_THRESHOLD };
                prop_assert_eq!(a.valid, a.confidence >= threshold);
            } else {
                prop_assert!(a.valid && !strict);
            }
        }
    }
}
