//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which transport delivers transactional mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Deliver through an SMTP relay (STARTTLS).
    Smtp,
    /// Write messages to the log instead of sending them.
    Console,
}

/// SMTP relay and sender identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport selection.
    #[serde(default = "default_transport")]
    pub transport: MailTransport,
    /// SMTP relay host.
    #[serde(default = "default_host")]
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Envelope sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Display name used in the From header and mail bodies.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Public URL of the web app, linked from mail bodies.
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            smtp_host: default_host(),
            smtp_port: default_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            app_url: default_app_url(),
        }
    }
}

fn default_transport() -> MailTransport {
    MailTransport::Console
}

fn default_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "no-reply@saveururl.me".to_string()
}

fn default_from_name() -> String {
    "SaveUrURL.ME".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}
