//! Development transport that writes messages to the log.

use async_trait::async_trait;
use tracing::info;

use crate::{MailError, Mailer, OutgoingMail};

/// Logs every message instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
        info!(
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.text,
            "Email (console transport)"
        );
        Ok(())
    }
}
