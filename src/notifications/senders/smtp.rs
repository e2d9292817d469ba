use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;
use uuid::Uuid;

use super::{MailSender, SenderError};
use crate::notifications::models::{OutgoingMail, SmtpSettings};

/// Sends mail through an SMTP relay. STARTTLS is mandatory.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailSender {
    pub fn new(settings: &SmtpSettings) -> Result<Self, SenderError> {
        let from: Mailbox = settings.sender.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| SenderError::InvalidConfiguration(format!("SMTP relay {}: {e}", settings.host)))?
            .port(settings.port);

        match (&settings.username, &settings.password) {
            (Some(username), Some(password)) => {
                builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
            }
            (None, None) => {}
            _ => {
                return Err(SenderError::InvalidConfiguration(
                    "SMTP username and password must be set together".to_string(),
                ));
            }
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, SenderError> {
        let to: Mailbox = mail.to.parse()?;
        let message_id = format!("<{}@landing-hook>", Uuid::new_v4());

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| SenderError::SendFailed(e.to_string()))?;
        debug!(code = %response.code(), message_id = %message_id, "SMTP relay accepted message.");

        Ok(message_id)
    }
}
