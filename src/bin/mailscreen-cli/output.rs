#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailscreen::{BatchOutcome, ValidationResult};

pub fn write_report(outcome: &BatchOutcome, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(outcome, cli),
        "json" => write_json(outcome, cli),
        "ndjson" => write_ndjson(outcome, cli),
        "csv" => write_csv(outcome, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(outcome: &BatchOutcome) -> bool {
    outcome.results.iter().any(|r| !r.valid)
}

fn write_human(outcome: &BatchOutcome, cli: &Cli) -> Result<()> {
    if cli.out.is_some() {
        bail!("--out requires --format json, ndjson or csv");
    }
    print!("{}", render_human(outcome));
    Ok(())
}

pub fn render_human(outcome: &BatchOutcome) -> String {
    let mut text = String::new();
    for r in &outcome.results {
        if r.valid {
            text.push_str(&format!("[OK]      {} ({})", r.email, r.confidence));
        } else {
            text.push_str(&format!(
                "[INVALID] {} ({}) :: {}",
                r.email,
                r.confidence,
                rejection_reason(r)
            ));
        }
        if !r.flags.is_empty() {
            text.push_str(&format!(" flags={}", r.flags.join(",")));
        }
        text.push('\n');
        for suggestion in &r.suggestions {
            let confidence = match suggestion.confidence {
                mailscreen::domain::SuggestionConfidence::High => "high",
                mailscreen::domain::SuggestionConfidence::Medium => "medium",
            };
            text.push_str(&format!(
                "          did you mean {} ({confidence})\n",
                suggestion.corrected_address
            ));
        }
        if let Some(smtp) = r.details.smtp.as_ref().filter(|s| !s.skipped) {
            text.push_str(&format!("          smtp: {} :: {}\n", smtp.verdict, smtp.details));
        }
    }
    let s = &outcome.summary;
    text.push_str(&format!(
        "summary: total={} valid={} invalid={} suggestions={} disposable={} suspicious={} avg_confidence={}\n",
        s.total, s.valid, s.invalid, s.with_suggestions, s.disposable, s.suspicious, s.average_confidence
    ));
    text
}

fn rejection_reason(r: &ValidationResult) -> &str {
    if let Some(reason) = r.details.failure_reason.as_deref() {
        return reason;
    }
    if r.details.domain.as_ref().is_some_and(|d| d.typo) {
        "Possible typo in domain"
    } else {
        "Confidence below threshold"
    }
}

#[cfg(feature = "with-serde")]
fn write_json(outcome: &BatchOutcome, cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(outcome)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &BatchOutcome, _: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(outcome: &BatchOutcome, cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for r in &outcome.results {
            let line = serde_json::to_string(r)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for r in &outcome.results {
            println!("{}", serde_json::to_string(r)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &BatchOutcome, _: &Cli) -> Result<()> {
    bail!("format=ndjson requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 11] = [
    "email",
    "normalized_email",
    "valid",
    "confidence",
    "syntax_valid",
    "domain_valid",
    "mx_valid",
    "smtp_valid",
    "flags",
    "suggestion",
    "failure_reason",
];

#[cfg(feature = "with-csv")]
fn write_csv(outcome: &BatchOutcome, cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for r in &outcome.results {
            wtr.write_record(csv_record(r))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for r in &outcome.results {
            wtr.write_record(csv_record(r))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &BatchOutcome, _: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

#[cfg(feature = "with-csv")]
fn csv_record(r: &ValidationResult) -> Vec<String> {
    vec![
        r.email.clone(),
        r.normalized_email.clone(),
        r.valid.to_string(),
        r.confidence.to_string(),
        r.syntax_valid.to_string(),
        r.domain_valid.to_string(),
        r.mx_valid.to_string(),
        bool_opt_str(r.smtp_valid.as_option()).to_string(),
        r.flags.join("|"),
        r.suggestions
            .first()
            .map(|s| s.corrected_address.clone())
            .unwrap_or_default(),
        r.details.failure_reason.clone().unwrap_or_default(),
    ]
}

#[cfg(feature = "with-csv")]
fn bool_opt_str(opt: Option<bool>) -> &'static str {
    match opt {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    }
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
