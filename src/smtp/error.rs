use thiserror::Error;

use super::SmtpReply;

#[derive(Debug, Error)]
pub enum SmtpProbeError {
    #[error("address has no domain: {0}")]
    InvalidAddress(String),
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("connection closed while reading reply")]
    UnexpectedEof,
    #[error("{stage} rejected with {code}: {message}")]
    Rejected {
        stage: &'static str,
        code: u16,
        message: String,
    },
}

impl SmtpProbeError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    pub(crate) fn rejected(stage: &'static str, reply: &SmtpReply) -> Self {
        Self::Rejected {
            stage,
            code: reply.code,
            message: reply.message.clone(),
        }
    }
}
