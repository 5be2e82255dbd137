//! # saveurl-mail
//!
//! Transactional email for SaveUrURL: verification codes, welcome mail,
//! password reset codes and reset confirmations.
//!
//! [`Mailer`] is the transport seam (SMTP in production, the log in
//! development, a recorder in tests); [`AccountMailer`] renders the
//! templates and hands finished messages to a transport.

pub mod account;
pub mod console;
pub mod error;
pub mod smtp;
pub mod templates;

use async_trait::async_trait;

pub use account::AccountMailer;
pub use console::ConsoleMailer;
pub use error::MailError;
pub use smtp::SmtpMailer;

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

/// Delivers rendered messages.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message, returning once the relay accepted it.
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError>;
}
