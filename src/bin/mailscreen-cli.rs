#[path = "mailscreen-cli/args.rs"]
mod args;
#[path = "mailscreen-cli/output.rs"]
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use mailscreen::{BatchOutcome, BatchSummary, BatchVerifier};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn collect_emails(cli: &Cli) -> Result<Vec<String>> {
    let mut emails = cli.emails.clone();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            emails.push(line.context("read stdin")?);
        }
    }
    emails.retain(|e| !e.trim().is_empty());
    Ok(emails)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let emails = collect_emails(&cli)?;
    if emails.is_empty() {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    let verifier = BatchVerifier::new(cli.verifier_config()).context("initialize DNS resolver")?;
    let options = cli.batch_options();
    let started = Instant::now();

    // The library caps one batch; larger inputs are run in consecutive batches.
    let mut results = Vec::with_capacity(emails.len());
    for chunk in emails.chunks(verifier.config().max_batch) {
        let offset = results.len();
        let outcome = verifier.run(chunk, &options).await;
        results.extend(outcome.results.into_iter().map(|mut r| {
            r.index += offset;
            r
        }));
    }
    let summary = BatchSummary::from_results(&results, started.elapsed());
    let outcome = BatchOutcome { results, summary };

    output::write_report(&outcome, &cli)?;

    // exit codes: 0 all valid, 2 some invalid, 1 fatal
    if output::any_invalid(&outcome) {
        std::process::exit(2);
    }
    Ok(())
}
