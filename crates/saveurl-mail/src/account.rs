//! Account lifecycle mail: renders templates and hands them to a transport.

use std::sync::Arc;

use saveurl_core::config::MailConfig;

use crate::templates::{self, Rendered};
use crate::{MailError, Mailer, OutgoingMail};

/// Sends the account lifecycle messages.
#[derive(Clone)]
pub struct AccountMailer {
    transport: Arc<dyn Mailer>,
    login_url: String,
    code_ttl_minutes: i64,
}

impl std::fmt::Debug for AccountMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountMailer")
            .field("login_url", &self.login_url)
            .field("code_ttl_minutes", &self.code_ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl AccountMailer {
    /// Create a mailer on top of a transport.
    pub fn new(transport: Arc<dyn Mailer>, config: &MailConfig, code_ttl_minutes: i64) -> Self {
        Self {
            transport,
            login_url: format!("{}/signin", config.app_url.trim_end_matches('/')),
            code_ttl_minutes,
        }
    }

    async fn send(&self, to: &str, rendered: Rendered) -> Result<(), MailError> {
        self.transport
            .deliver(OutgoingMail {
                to: to.to_string(),
                subject: rendered.subject,
                html: rendered.html,
                text: rendered.text,
            })
            .await
    }

    /// Email verification code.
    pub async fn send_verification(&self, to: &str, code: &str) -> Result<(), MailError> {
        self.send(to, templates::verification(code, self.code_ttl_minutes))
            .await
    }

    /// Welcome message after verification.
    pub async fn send_welcome(&self, to: &str, name: &str) -> Result<(), MailError> {
        self.send(to, templates::welcome(name, &self.login_url)).await
    }

    /// Password reset code.
    pub async fn send_password_reset(
        &self,
        to: &str,
        name: &str,
        code: &str,
    ) -> Result<(), MailError> {
        self.send(
            to,
            templates::password_reset(name, code, self.code_ttl_minutes),
        )
        .await
    }

    /// Confirmation that the password was changed.
    pub async fn send_reset_success(&self, to: &str) -> Result<(), MailError> {
        self.send(to, templates::reset_success(&self.login_url)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl Mailer for Recorder {
        async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
            self.sent.lock().expect("lock").push(mail);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_login_url_built_from_app_url() {
        let recorder = Arc::new(Recorder::default());
        let config = MailConfig {
            app_url: "https://saveururl.me/".into(),
            ..MailConfig::default()
        };
        let mailer = AccountMailer::new(recorder.clone(), &config, 15);

        mailer.send_welcome("a@x.com", "Ann").await.expect("send");

        let sent = recorder.sent.lock().expect("lock");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.com");
        assert!(sent[0].text.contains("https://saveururl.me/signin"));
    }

    #[tokio::test]
    async fn test_reset_code_delivered() {
        let recorder = Arc::new(Recorder::default());
        let mailer = AccountMailer::new(recorder.clone(), &MailConfig::default(), 10);

        mailer
            .send_password_reset("a@x.com", "Ann", "123456")
            .await
            .expect("send");

        let sent = recorder.sent.lock().expect("lock");
        assert_eq!(sent[0].subject, "Reset Your Password");
        assert!(sent[0].text.contains("123456"));
        assert!(sent[0].text.contains("10 minutes"));
    }
}
