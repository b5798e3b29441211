use std::future::Future;

use tracing::debug;

use super::session::SmtpSession;
use super::util::random_local_part;
use super::{SmtpOutcome, SmtpProbeError, SmtpProbeOptions};

/// A single RCPT-level mailbox probe against one mail host.
pub trait MailboxProbe: Send + Sync + 'static {
    fn probe(
        &self,
        address: &str,
        exchange: &str,
    ) -> impl Future<Output = Result<SmtpOutcome, SmtpProbeError>> + Send;
}

/// Live prober speaking plain SMTP over TCP.
#[derive(Debug, Clone, Default)]
pub struct SmtpProber {
    options: SmtpProbeOptions,
}

impl SmtpProber {
    pub fn new(options: SmtpProbeOptions) -> Self {
        Self { options }
    }
}

impl MailboxProbe for SmtpProber {
    async fn probe(&self, address: &str, exchange: &str) -> Result<SmtpOutcome, SmtpProbeError> {
        let (local, domain) = address
            .rsplit_once('@')
            .ok_or_else(|| SmtpProbeError::InvalidAddress(address.to_string()))?;

        let mut session = SmtpSession::connect(exchange, self.options.port).await?;

        let banner = session.read_banner().await?;
        if !banner.is_positive_completion() {
            session.quit().await;
            return Err(SmtpProbeError::rejected("banner", &banner));
        }

        let helo = self.options.helo_name(domain);
        let ehlo = session.send_command(&format!("EHLO {helo}")).await?;
        if !ehlo.is_positive_completion() {
            session.quit().await;
            return Err(SmtpProbeError::rejected("EHLO", &ehlo));
        }

        let sender = self.options.envelope_sender(domain);
        let mail = session
            .send_command(&format!("MAIL FROM:<{sender}>"))
            .await?;
        if !mail.is_positive_completion() {
            session.quit().await;
            return Err(SmtpProbeError::rejected("MAIL FROM", &mail));
        }

        let rcpt = session.send_command(&format!("RCPT TO:<{address}>")).await?;
        debug!(exchange, code = rcpt.code, "rcpt reply");

        let mut catch_all = None;
        if self.options.catchall_probe && rcpt.is_positive_completion() {
            let alias = format!("{}@{domain}", random_local_part(local.len()));
            match session.send_command(&format!("RCPT TO:<{alias}>")).await {
                Ok(reply) => catch_all = Some(reply.is_positive_completion()),
                Err(err) => debug!(exchange, error = %err, "catch-all rcpt failed"),
            }
        }

        if session.send_command("RSET").await.is_err() {
            debug!(exchange, "RSET failed");
        }
        session.quit().await;

        Ok(SmtpOutcome {
            rcpt,
            catch_all,
            transcript: session.into_transcript(),
        })
    }
}
