//! Mail transports
//!
//! A transport takes one fully built [`OutgoingEmail`] and reports whether it was
//! handed off. `SendmailTransport` pipes the message into the local `sendmail`
//! binary, `LogTransport` only writes it to the server log.

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::logger;

/// `X-Mailer` header value
pub const MAILER_TAG: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to start {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write message to sendmail: {0}")]
    Io(#[from] std::io::Error),

    #[error("sendmail stdin was not captured")]
    NoStdin,

    #[error("sendmail exited with {status}: {stderr}")]
    Exit {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub sender_name: String,
    pub sender_email: String,
}

impl OutgoingEmail {
    /// `"name" <email>` with header-unsafe characters removed
    pub fn sender(&self) -> String {
        let name: String = header_value(&self.sender_name)
            .chars()
            .filter(|c| *c != '"' && *c != '\\')
            .collect();
        format!("\"{name}\" <{}>", header_value(&self.sender_email))
    }

    /// Header lines in the order they are written
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let sender = self.sender();
        vec![
            ("To", header_value(&self.to)),
            ("Subject", header_value(&self.subject)),
            ("From", sender.clone()),
            ("Reply-To", sender),
            ("X-Mailer", MAILER_TAG.to_string()),
        ]
    }

    /// Full message text as handed to `sendmail -t`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.headers() {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Drop CR and LF so a value cannot start a new header line
fn header_value(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Short name for log lines
    fn name(&self) -> &'static str;

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Delivers through a local `sendmail`-compatible binary
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    path: String,
}

impl SendmailTransport {
    pub const fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait]
impl MailTransport for SendmailTransport {
    fn name(&self) -> &'static str {
        "sendmail"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        // -t: recipients from headers, -i: a lone "." does not end the message
        let mut child = Command::new(&self.path)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| MailError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or(MailError::NoStdin)?;
        // A child that exits early closes the pipe; its exit status decides the outcome
        if let Err(e) = write_message(&mut stdin, &email.render()).await {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
        drop(stdin);

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(MailError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

async fn write_message(stdin: &mut tokio::process::ChildStdin, text: &str) -> std::io::Result<()> {
    stdin.write_all(text.as_bytes()).await?;
    stdin.shutdown().await
}

/// Writes messages to the log instead of delivering them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        logger::log_mail_preview(&email.render());
        Ok(())
    }
}
