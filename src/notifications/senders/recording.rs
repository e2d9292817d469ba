//! In-memory [`MailSender`] for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{MailSender, SenderError};
use crate::notifications::models::OutgoingMail;

#[derive(Clone, Default)]
pub struct RecordingMailSender {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    fail: bool,
}

impl RecordingMailSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, SenderError> {
        if self.fail {
            return Err(SenderError::SendFailed("relay refused".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(mail.clone());
        Ok(format!("test-{}", sent.len()))
    }
}
