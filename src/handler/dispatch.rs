//! Form dispatch
//!
//! Picks the rating lookup when both `action` and `widget_id` were posted,
//! the contact mailer otherwise, and turns the result into one typed [`Outcome`].

use serde::Serialize;

use crate::config::AppState;
use crate::contact::{ContactMailer, ContactSubmission, FieldError, MailOutcome};
use crate::http::FormFields;
use crate::logger;
use crate::rating::RatingResponse;

/// Result of handling one form post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rating(i64),
    MailSuccess,
    MailFailure(Vec<FieldError>),
}

#[derive(Serialize)]
struct MailResponse<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl Outcome {
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Rating(box_num) => serde_json::to_string(&RatingResponse::new(*box_num)),
            Self::MailSuccess => serde_json::to_string(&MailResponse {
                success: true,
                errors: None,
            }),
            Self::MailFailure(errors) => serde_json::to_string(&MailResponse {
                success: false,
                errors: Some(errors.as_slice()),
            }),
        }
    }
}

impl From<MailOutcome> for Outcome {
    fn from(outcome: MailOutcome) -> Self {
        match outcome {
            MailOutcome::Sent => Self::MailSuccess,
            failed => Self::MailFailure(failed.errors().to_vec()),
        }
    }
}

pub async fn dispatch(form: &FormFields, state: &AppState) -> Outcome {
    if form.contains("action") && form.contains("widget_id") {
        let widget_id = form.get("widget_id").unwrap_or_default();
        let box_num = state.ratings.lookup(widget_id);
        logger::log_rating_lookup(widget_id, box_num);
        return Outcome::Rating(box_num);
    }

    let submission = ContactSubmission::from_namespace(form.namespace("contact"));
    let mailer = ContactMailer::new(&state.config.mail.to_email, state.transport.as_ref());
    let outcome = mailer.run(&submission).await;
    if let MailOutcome::SendFailed(ref err) = outcome {
        logger::log_mail_failed(state.transport.name(), err);
    }
    outcome.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::contact::testing::StubTransport;
    use std::sync::Arc;

    fn state(stub: Arc<StubTransport>) -> AppState {
        let config = Config::from_toml_str(
            r#"
            [ratings]
            widget_1 = 5
            widget_3 = 42

            [mail]
            to_email = "owner@example.com"
            transport = "log"
            "#,
        )
        .unwrap();
        AppState::with_transport(&config, stub)
    }

    async fn run(body: &str, stub: Arc<StubTransport>) -> String {
        let state = state(stub);
        let form = FormFields::parse(body.as_bytes());
        dispatch(&form, &state).await.to_json().unwrap()
    }

    #[tokio::test]
    async fn test_rating_lookup() {
        let stub = Arc::new(StubTransport::default());
        assert_eq!(
            run("action=get_rating&widget_id=r3", Arc::clone(&stub)).await,
            r#"{"ResponseData":{"Box_Num":42}}"#
        );
        assert_eq!(
            run("action=get_rating&widget_id=unknown", Arc::clone(&stub)).await,
            r#"{"ResponseData":{"Box_Num":0}}"#
        );
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_widget_id_alone_goes_to_mailer() {
        let stub = Arc::new(StubTransport::default());
        let json = run("widget_id=r3", stub).await;
        assert!(json.starts_with(r#"{"success":false"#), "{json}");
    }

    #[tokio::test]
    async fn test_mail_success() {
        let stub = Arc::new(StubTransport::default());
        let json = run(
            "contact[name]=Alice&contact[email]=a%40b.com&contact[subject]=Hi&contact[message]=Hello",
            Arc::clone(&stub),
        )
        .await;
        assert_eq!(json, r#"{"success":true}"#);

        let sent = stub.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
    }

    #[tokio::test]
    async fn test_mail_validation_errors_in_order() {
        let stub = Arc::new(StubTransport::default());
        let json = run(
            "contact[name]=&contact[email]=bad-email&contact[subject]=S&contact[message]=M",
            Arc::clone(&stub),
        )
        .await;
        assert_eq!(
            json,
            r#"{"success":false,"errors":[{"field":"name","error":"empty"},{"field":"email","error":"invalid"}]}"#
        );
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_contact_namespace() {
        let stub = Arc::new(StubTransport::default());
        let json = run("", stub).await;
        assert_eq!(
            json,
            r#"{"success":false,"errors":[{"field":"name","error":"empty"},{"field":"email","error":"empty"},{"field":"subject","error":"empty"},{"field":"message","error":"empty"}]}"#
        );
    }

    #[tokio::test]
    async fn test_send_failure_reports_empty_errors() {
        let stub = Arc::new(StubTransport::failing());
        let json = run(
            "contact[name]=Alice&contact[email]=a%40b.com&contact[subject]=Hi&contact[message]=Hello",
            stub,
        )
        .await;
        assert_eq!(json, r#"{"success":false,"errors":[]}"#);
    }
}
