//! Mailer trait and SMTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{Email, MailError};
use crate::key::RoutingSpec;

/// Async email sending trait.
///
/// The SMTP target comes with every call rather than at construction, because each
/// webhook request names its own server and account.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, route: &RoutingSpec, email: &Email) -> Result<(), MailError>;
}

/// Transport settings shared by every delivery.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Bound on connect, authentication and each SMTP command.
    pub timeout: Duration,

    /// Verify the server certificate. Off by default: relays typically sit on
    /// trusted networks in front of servers with self-signed certificates.
    pub verify_certs: bool,
}

impl Default for MailerConfig {
    fn default() -> Self {
        MailerConfig {
            timeout: Duration::from_secs(10),
            verify_certs: false,
        }
    }
}

/// SMTP mailer using lettre over implicit TLS (SMTPS).
#[derive(Debug, Clone, Default)]
pub struct SmtpMailer {
    config: MailerConfig,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Self {
        SmtpMailer { config }
    }

    fn build_transport(
        &self,
        route: &RoutingSpec,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let tls = TlsParameters::builder(route.smtp_host.clone())
            .dangerous_accept_invalid_certs(!self.config.verify_certs)
            .dangerous_accept_invalid_hostnames(!self.config.verify_certs)
            .build()
            .map_err(|e| MailError::Tls(e.to_string()))?;

        let credentials = Credentials::new(route.auth_user.clone(), route.auth_password.clone());

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&route.smtp_host)
                .port(route.smtp_port)
                .tls(Tls::Wrapper(tls))
                .credentials(credentials)
                .timeout(Some(self.config.timeout))
                .build(),
        )
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, route: &RoutingSpec, email: &Email) -> Result<(), MailError> {
        let message = email.to_message()?;
        let transport = self.build_transport(route)?;

        tracing::debug!(
            host = %route.smtp_host,
            port = route.smtp_port,
            user = %route.auth_user,
            "connecting to smtp server"
        );

        transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> RoutingSpec {
        RoutingSpec {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 465,
            auth_user: "bot@example.com".into(),
            auth_password: "pw".into(),
            from_address: "bot@example.com".into(),
            to_address: "bot@example.com".into(),
        }
    }

    #[test]
    fn default_config_skips_verification() {
        let config = MailerConfig::default();
        assert!(!config.verify_certs);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn builds_transport_for_route() {
        let mailer = SmtpMailer::default();
        assert!(mailer.build_transport(&route()).is_ok());

        let strict = SmtpMailer::new(MailerConfig {
            verify_certs: true,
            ..Default::default()
        });
        assert!(strict.build_transport(&route()).is_ok());
    }

    #[tokio::test]
    async fn invalid_address_fails_before_connecting() {
        let mailer = SmtpMailer::default();
        let email = Email::html("bad address", "ops@example.com", "s", "b");
        let err = mailer.send(&route(), &email).await.unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }
}
