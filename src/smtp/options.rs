#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for the live handshake.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    /// Name sent with `EHLO`. Empty means the target's domain.
    pub helo_domain: String,
    /// Envelope sender. Empty means `postmaster@<target domain>`.
    pub mail_from: String,
    pub port: u16,
    /// Also try a random local part to detect catch-all domains.
    pub catchall_probe: bool,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            helo_domain: String::new(),
            mail_from: String::new(),
            port: 25,
            catchall_probe: false,
        }
    }
}

impl SmtpProbeOptions {
    pub fn helo_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.helo_domain.trim().is_empty() {
            fallback
        } else {
            &self.helo_domain
        }
    }

    pub fn envelope_sender(&self, domain: &str) -> String {
        if self.mail_from.trim().is_empty() {
            format!("postmaster@{domain}")
        } else {
            self.mail_from.clone()
        }
    }
}
