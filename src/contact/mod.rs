//! Contact mailer
//!
//! Runs one submission through validate, send, respond:
//! invalid submissions never reach the transport, and a transport failure
//! is reported with whatever validation errors exist (none).

mod submission;
mod transport;
mod validation;

pub use submission::ContactSubmission;
pub use transport::{LogTransport, MailError, MailTransport, OutgoingEmail, SendmailTransport};
pub use validation::FieldError;

use validation::{validate, ValidContact};

use crate::logger;

/// Result of one mailer run
#[derive(Debug)]
pub enum MailOutcome {
    Sent,
    Rejected(Vec<FieldError>),
    SendFailed(MailError),
}

impl MailOutcome {
    /// Errors to report to the client; empty for a send failure
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Rejected(errors) => errors,
            Self::Sent | Self::SendFailed(_) => &[],
        }
    }
}

/// Sends validated submissions to a single destination address
pub struct ContactMailer<'a> {
    to_email: &'a str,
    transport: &'a dyn MailTransport,
}

impl<'a> ContactMailer<'a> {
    pub const fn new(to_email: &'a str, transport: &'a dyn MailTransport) -> Self {
        Self {
            to_email,
            transport,
        }
    }

    pub fn compose(&self, contact: &ValidContact<'_>) -> OutgoingEmail {
        OutgoingEmail {
            to: self.to_email.to_string(),
            subject: contact.subject.to_string(),
            body: contact.message.to_string(),
            sender_name: contact.name.to_string(),
            sender_email: contact.email.to_string(),
        }
    }

    pub async fn run(&self, submission: &ContactSubmission) -> MailOutcome {
        let contact = match validate(submission) {
            Ok(contact) => contact,
            Err(errors) => {
                logger::log_contact_rejected(&errors);
                return MailOutcome::Rejected(errors);
            }
        };

        let email = self.compose(&contact);
        match self.transport.send(&email).await {
            Ok(()) => {
                logger::log_mail_sent(self.transport.name(), &email.to);
                MailOutcome::Sent
            }
            Err(e) => MailOutcome::SendFailed(e),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{MailError, MailTransport, OutgoingEmail};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory transport recording every message it is asked to send
    #[derive(Default)]
    pub struct StubTransport {
        pub fail: bool,
        pub sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl StubTransport {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailTransport for StubTransport {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            if self.fail {
                Err(MailError::Io(std::io::Error::other("stub transport failure")))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubTransport;
    use super::*;

    fn submission(name: &str, email: &str, subject: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            subject: Some(subject.to_string()),
            message: Some(message.to_string()),
        }
    }

    #[tokio::test]
    async fn test_valid_submission_is_sent() {
        let stub = StubTransport::default();
        let mailer = ContactMailer::new("owner@example.com", &stub);

        let outcome = mailer
            .run(&submission("Alice", "a@b.com", "Hi", "Hello"))
            .await;
        assert!(matches!(outcome, MailOutcome::Sent));

        let sent = stub.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].subject, "Hi");
        assert_eq!(sent[0].body, "Hello");
        assert_eq!(sent[0].sender(), "\"Alice\" <a@b.com>");
    }

    #[tokio::test]
    async fn test_invalid_submission_skips_transport() {
        let stub = StubTransport::default();
        let mailer = ContactMailer::new("owner@example.com", &stub);

        let outcome = mailer.run(&submission("", "bad-email", "S", "M")).await;
        assert!(matches!(outcome, MailOutcome::Rejected(_)));
        assert_eq!(outcome.errors().len(), 2);
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_has_no_field_errors() {
        let stub = StubTransport::failing();
        let mailer = ContactMailer::new("owner@example.com", &stub);

        let outcome = mailer
            .run(&submission("Alice", "a@b.com", "Hi", "Hello"))
            .await;
        assert!(matches!(outcome, MailOutcome::SendFailed(_)));
        assert!(outcome.errors().is_empty());
        assert_eq!(stub.sent().len(), 1);
    }
}
