use clap::Parser;
use mailscreen::batch::{DEFAULT_MAX_IN_FLIGHT, DEFAULT_SMTP_TIMEOUT_MS};
use mailscreen::{BatchOptions, SmtpProbeOptions, VerifierConfig};

#[derive(Parser, Debug)]
#[command(name = "mailscreen-cli", version, about = "Batch e-mail deliverability screening")]
pub struct Cli {
    /// addresses to verify
    pub emails: Vec<String>,

    /// read addresses from stdin (one per line)
    #[arg(long)]
    pub stdin: bool,

    /// stop after the DNS stage
    #[arg(long)]
    pub skip_smtp: bool,

    /// require confidence >= 90 and disable the popular-provider override
    #[arg(long)]
    pub strict: bool,

    #[arg(long)]
    pub no_disposable_check: bool,

    #[arg(long)]
    pub no_suggestions: bool,

    /// SMTP deadline per address (ms)
    #[arg(long, default_value_t = DEFAULT_SMTP_TIMEOUT_MS)]
    pub timeout: u64,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// write report to file (JSON/NDJSON/CSV depending on --format)
    #[arg(long)]
    pub out: Option<String>,

    /// name used for EHLO
    #[arg(long, env = "MAILSCREEN_HELO")]
    pub helo: Option<String>,

    /// MAIL FROM envelope (default postmaster@<domain>)
    #[arg(long = "from", env = "MAILSCREEN_FROM")]
    pub mail_from: Option<String>,

    /// try a random mailbox to detect catch-all domains
    #[arg(long)]
    pub catchall_probe: bool,

    #[arg(long, default_value_t = 25)]
    pub smtp_port: u16,

    /// addresses verified concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_in_flight: usize,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            skip_smtp: self.skip_smtp,
            check_disposable: !self.no_disposable_check,
            strict_validation: self.strict,
            timeout: self.timeout,
            include_suggestions: !self.no_suggestions,
        }
    }

    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig {
            max_in_flight: self.max_in_flight,
            smtp: SmtpProbeOptions {
                helo_domain: self.helo.clone().unwrap_or_default(),
                mail_from: self.mail_from.clone().unwrap_or_default(),
                port: self.smtp_port,
                catchall_probe: self.catchall_probe,
            },
            ..VerifierConfig::default()
        }
    }
}
