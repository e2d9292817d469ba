use serde::{Deserialize, Serialize};

/// A fully composed message, ready to hand to a [`MailSender`](super::senders::MailSender).
/// The sender address is owned by the transport, not the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// SMTP connection settings, sourced from [`ServerConfig`](crate::server::config::ServerConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender: String,
}
