use tokio::time::Instant;
use tracing::debug;

use super::types::{
    FAILURE_DOMAIN, FAILURE_NO_MAIL_SERVERS, FAILURE_SYNTAX, FLAG_CATCH_ALL, FLAG_DISPOSABLE,
    FLAG_POPULAR_ACCEPTED, FLAG_SUSPICIOUS_PREFIX, millis,
};
use super::{BatchOptions, ValidationResult};
use crate::dns::{DnsLookup, DnsProbe};
use crate::scoring::{self, Signals};
use crate::smtp::{MailboxProbe, SmtpProbe, SmtpReport};
use crate::{domain, syntax};

/// Runs every stage for one address, stopping at the first decisive failure.
pub(crate) async fn verify_address<R: DnsLookup, P: MailboxProbe>(
    dns: &DnsProbe<R>,
    smtp: &SmtpProbe<P>,
    email: &str,
    index: usize,
    options: &BatchOptions,
) -> ValidationResult {
    let started = Instant::now();
    let mut result = ValidationResult::new(email, index, options);
    let normalized = result.normalized_email.clone();
    let mut popular = false;

    'stages: {
        let syntax = syntax::check(&normalized);
        result.syntax_valid = syntax.valid;
        let suspicious = syntax.suspicious_score;
        result.details.syntax = Some(syntax);
        if !result.syntax_valid {
            result.fail(FAILURE_SYNTAX);
            break 'stages;
        }
        if suspicious > 0 {
            result
                .flags
                .push(format!("{FLAG_SUSPICIOUS_PREFIX}_pattern_score_{suspicious}"));
        }

        let domain_report = domain::check(&normalized);
        result.domain_valid = domain_report.valid;
        popular = domain::is_popular_provider(&domain_report.ascii_domain);
        if options.include_suggestions {
            if let Some(suggestion) = domain_report.to_suggestion() {
                result.suggestions.push(suggestion);
            }
        }
        if domain_report.is_disposable && options.check_disposable {
            result.flags.push(FLAG_DISPOSABLE.to_string());
        }
        let typo = domain_report.typo;
        result.details.domain = Some(domain_report);
        if !result.domain_valid {
            if !typo {
                result.fail(FAILURE_DOMAIN);
            }
            break 'stages;
        }

        let report = dns.check(&normalized).await;
        result.mx_valid = report.valid;
        let mail_host = report.mail_host().map(str::to_owned);
        result.details.dns = Some(report);

        if options.skip_smtp {
            result.details.smtp = Some(SmtpReport::skipped("SMTP check skipped by request"));
        }
        let Some(host) = mail_host else {
            result.fail(FAILURE_NO_MAIL_SERVERS);
            break 'stages;
        };
        if options.skip_smtp {
            break 'stages;
        }

        let report = smtp.check(&normalized, &host, options.smtp_timeout()).await;
        result.smtp_valid = report.verdict;
        if report.catch_all == Some(true) {
            result.flags.push(FLAG_CATCH_ALL.to_string());
        }
        result.details.smtp = Some(report);
    }

    let assessment = scoring::assess(
        &Signals {
            syntax: result.syntax_valid,
            domain: result.domain_valid,
            mx: result.mx_valid,
            smtp: result.smtp_valid,
            popular_provider: popular,
        },
        options.strict_validation,
    );
    result.confidence = assessment.confidence;
    result.valid = assessment.valid;
    if assessment.popular_override {
        result.flags.push(FLAG_POPULAR_ACCEPTED.to_string());
    }
    result.metadata.processing_time_ms = millis(started.elapsed());
    debug!(
        confidence = result.confidence,
        valid = result.valid,
        smtp = %result.smtp_valid,
        "address verified"
    );
    result
}
