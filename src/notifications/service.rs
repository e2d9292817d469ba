use std::sync::Arc;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{error, info, warn};

use super::models::OutgoingMail;
use super::senders::{MailSender, SenderError};
use crate::landing::form::CapturedField;

pub const NOTIFICATION_SUBJECT: &str = "New lead from your landing page";

// Rendered with autoescape, which also encodes `/` as `&#x2F;`. The mail is
// sent as text/html only, so clients decode it; there is no plain-text part.
const LEAD_TEMPLATE: &str = r#"<html>
<body>
<h2>{{ title }}</h2>
<p>A new lead was captured on your landing page.</p>
<ul>
{% for field in fields %}<li><strong>{{ field.label }}:</strong> {{ field.value }}</li>
{% endfor %}</ul>
</body>
</html>"#;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Templating error: {0}")]
    TemplatingError(#[from] tera::Error),
    #[error("Sender error: {0}")]
    SenderError(#[from] SenderError),
}

/// Emails lead notifications. Without a configured transport every
/// notification is skipped.
pub struct NotificationService {
    sender: Option<Arc<dyn MailSender>>,
}

impl NotificationService {
    pub fn new(sender: Option<Arc<dyn MailSender>>) -> Self {
        Self { sender }
    }

    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Renders the lead email. Field values are HTML-escaped.
    pub fn compose_lead_mail(
        to: &str,
        page_title: &str,
        captured: &[CapturedField],
    ) -> Result<OutgoingMail, NotificationError> {
        let mut context = Context::new();
        context.insert("title", page_title);
        context.insert("fields", captured);
        let html_body = Tera::one_off(LEAD_TEMPLATE, &context, true)?;

        Ok(OutgoingMail {
            to: to.to_string(),
            subject: NOTIFICATION_SUBJECT.to_string(),
            html_body,
        })
    }

    /// Sends the lead email if the page asks for one. Never fails: problems
    /// are logged and reported as `None`.
    pub async fn notify_lead(
        &self,
        notify_email: Option<&str>,
        page_title: &str,
        captured: &[CapturedField],
    ) -> Option<String> {
        let to = notify_email.map(str::trim).filter(|to| !to.is_empty())?;

        let Some(sender) = &self.sender else {
            warn!(to, "Lead notification requested but no mail transport is configured.");
            return None;
        };

        match self.dispatch(sender.as_ref(), to, page_title, captured).await {
            Ok(dispatch_id) => {
                info!(to, dispatch_id = %dispatch_id, "Lead notification sent.");
                Some(dispatch_id)
            }
            Err(e) => {
                error!(error = %e, to, "Failed to send lead notification.");
                None
            }
        }
    }

    async fn dispatch(
        &self,
        sender: &dyn MailSender,
        to: &str,
        page_title: &str,
        captured: &[CapturedField],
    ) -> Result<String, NotificationError> {
        let mail = Self::compose_lead_mail(to, page_title, captured)?;
        Ok(sender.send(&mail).await?)
    }
}
