//! SMTP transport for production.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use saveurl_core::config::MailConfig;

use crate::{MailError, Mailer, OutgoingMail};

/// Sends mail through an SMTP relay using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Create a pooled SMTP transport from configuration.
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(Some(&config.from_name), &config.from_email)?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Transport(format!("invalid relay '{}': {e}", config.smtp_host)))?
            .port(config.smtp_port);
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        info!(host = %config.smtp_host, port = config.smtp_port, "SMTP transport configured");

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn parse_mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, MailError> {
    let parsed = address.parse().map_err(|e| MailError::InvalidAddress {
        address: address.to_string(),
        reason: format!("{e}"),
    })?;
    Ok(Mailbox::new(name.map(str::to_string), parsed))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(None, &mail.to)?)
            .subject(mail.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(mail.text, mail.html))
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        info!(to = %mail.to, subject = %mail.subject, "Email sent");
        Ok(())
    }
}
