//! Send email action

use tracing::info;

use crate::common::utils::{is_valid_email, required_text};
use crate::common::ServiceError;
use crate::domains::email::models::SendEmailBody;
use crate::kernel::ServerDeps;

/// Validate the body and send it. Returns the provider's message id.
pub async fn send_email(body: SendEmailBody, deps: &ServerDeps) -> Result<String, ServiceError> {
    let email = deps
        .email
        .as_ref()
        .ok_or(ServiceError::NotConfigured("RESEND_API_KEY"))?;

    let to = required_text(body.to.as_deref()).ok_or(ServiceError::MissingField("to"))?;
    let subject =
        required_text(body.subject.as_deref()).ok_or(ServiceError::MissingField("subject"))?;
    let html = required_text(body.html.as_deref()).ok_or(ServiceError::MissingField("html"))?;

    if !is_valid_email(to) {
        return Err(ServiceError::InvalidAddress(to.to_string()));
    }

    let id = email.send_email(to, subject, html).await?;
    info!(message_id = %id, "Email sent");

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockEmailService;
    use crate::kernel::TestDependencies;

    fn body(to: &str) -> SendEmailBody {
        SendEmailBody {
            to: Some(to.into()),
            subject: Some("Tu avalúo".into()),
            html: Some("<p>Hola</p>".into()),
        }
    }

    #[tokio::test]
    async fn sends_valid_email() {
        let deps = TestDependencies::new();

        let id = send_email(body("ana@example.com"), &deps.server_deps())
            .await
            .unwrap();

        assert_eq!(id, "mock-email-1");
        let sent = deps.email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ana@example.com");
        assert_eq!(sent[0].subject, "Tu avalúo");
    }

    #[tokio::test]
    async fn missing_fields_are_named() {
        let deps = TestDependencies::new();

        let mut no_subject = body("ana@example.com");
        no_subject.subject = None;
        let err = send_email(no_subject, &deps.server_deps()).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("subject")));

        let mut blank_html = body("ana@example.com");
        blank_html.html = Some("  ".into());
        let err = send_email(blank_html, &deps.server_deps()).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("html")));

        assert!(deps.email.sent().is_empty());
    }

    #[tokio::test]
    async fn invalid_address_is_rejected() {
        let deps = TestDependencies::new();

        let err = send_email(body("no-es-correo"), &deps.server_deps())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_upstream() {
        let deps = TestDependencies::new().mock_email(MockEmailService::failing(422, "bad from"));

        let err = send_email(body("ana@example.com"), &deps.server_deps())
            .await
            .unwrap_err();
        match err {
            ServiceError::Upstream(e) => assert_eq!(e.body, "bad from"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn html_body_alias_is_accepted() {
        let body: SendEmailBody =
            serde_json::from_str(r#"{"to":"a@b.co","subject":"s","htmlBody":"<b>x</b>"}"#).unwrap();
        assert_eq!(body.html.as_deref(), Some("<b>x</b>"));
    }
}
