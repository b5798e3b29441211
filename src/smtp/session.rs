use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use super::{SmtpProbeError, SmtpReply};

pub(crate) struct SmtpSession {
    host: String,
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    transcript: Vec<String>,
}

impl SmtpSession {
    pub(crate) async fn connect(host: &str, port: u16) -> Result<Self, SmtpProbeError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| SmtpProbeError::Connect {
                host: format!("{host}:{port}"),
                source,
            })?;
        let (read, writer) = stream.into_split();
        Ok(Self {
            host: host.to_string(),
            reader: BufReader::new(read),
            writer,
            transcript: Vec::new(),
        })
    }

    pub(crate) async fn read_banner(&mut self) -> Result<SmtpReply, SmtpProbeError> {
        let reply = self.read_reply().await?;
        self.record_reply(&reply);
        Ok(reply)
    }

    pub(crate) async fn send_command(&mut self, command: &str) -> Result<SmtpReply, SmtpProbeError> {
        self.record("C", command);
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.writer
            .write_all(&line)
            .await
            .map_err(SmtpProbeError::io)?;
        self.writer.flush().await.map_err(SmtpProbeError::io)?;
        let reply = self.read_reply().await?;
        self.record_reply(&reply);
        Ok(reply)
    }

    /// Best effort; the server may drop the connection first.
    pub(crate) async fn quit(&mut self) {
        if self.send_command("QUIT").await.is_err() {
            self.record("!", "no reply to QUIT");
        }
        let _ = self.writer.shutdown().await;
    }

    pub(crate) fn into_transcript(self) -> Vec<String> {
        self.transcript
    }

    async fn read_reply(&mut self) -> Result<SmtpReply, SmtpProbeError> {
        let mut code = None;
        let mut message_lines = Vec::new();
        loop {
            let mut raw = String::new();
            let bytes = self
                .reader
                .read_line(&mut raw)
                .await
                .map_err(SmtpProbeError::io)?;
            if bytes == 0 {
                return Err(SmtpProbeError::UnexpectedEof);
            }
            if raw.ends_with('\n') {
                raw.pop();
                if raw.ends_with('\r') {
                    raw.pop();
                }
            }

            if raw.len() < 3 || !raw.is_char_boundary(3) {
                return Err(SmtpProbeError::Protocol(format!("invalid reply: '{raw}'")));
            }
            let code_part = &raw[..3];
            let parsed_code = code_part.parse::<u16>().map_err(|_| {
                SmtpProbeError::Protocol(format!("invalid status code: '{code_part}'"))
            })?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(SmtpProbeError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let continuation = raw.as_bytes().get(3).copied() == Some(b'-');
            let text = raw.get(4..).unwrap_or_default().to_string();
            message_lines.push(text);
            if !continuation {
                break;
            }
        }
        let code = code
            .ok_or_else(|| SmtpProbeError::Protocol("reply missing status code".to_string()))?;
        Ok(SmtpReply {
            code,
            message: message_lines.join("\n"),
        })
    }

    fn record(&mut self, direction: &str, message: &str) {
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }

    fn record_reply(&mut self, reply: &SmtpReply) {
        if reply.message.is_empty() {
            self.record("S", &reply.code.to_string());
        } else {
            for line in reply.message.lines() {
                let entry = format!("{} {}", reply.code, line);
                self.record("S", &entry);
            }
        }
    }
}
