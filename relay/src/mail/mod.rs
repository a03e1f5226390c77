//! Outbound SMTP delivery.
//!
//! A thin layer over [lettre](https://lettre.rs). Unlike a long-lived application
//! mailer, the relay learns the SMTP server and credentials from each request's
//! [`RoutingSpec`](crate::key::RoutingSpec), so [`SmtpMailer`] opens a fresh
//! connection for every message and keeps only process-wide transport settings.
//!
//! ```ignore
//! let mailer = SmtpMailer::new(MailerConfig::default());
//! let email = Email::html("bot@example.com", "ops@example.com", "Disk full", "<p>97%</p>");
//! mailer.send(&routing, &email).await?;
//! ```

mod mailer;
mod message;

pub use mailer::{Mailer, MailerConfig, SmtpMailer};
pub use message::Email;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}
