use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use config::ConfigError;

use crate::mail::MailerConfig;

/// Prefix for the relay's environment variables, e.g. `MAILHOOK_PORT`.
pub const ENV_PREFIX: &str = "MAILHOOK";

pub trait EnvConfig: Sized {
    fn from_env() -> Result<Self, ConfigError>;
    fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError>;
}

impl<D> EnvConfig for D
where
    D: DeserializeOwned,
{
    fn from_env() -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix(prefix))
            .build()?
            .try_deserialize()
    }
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// SMTP timeout in seconds.
    #[serde(default = "default_smtp_timeout")]
    pub smtp_timeout: u64,

    #[serde(default)]
    pub verify_certs: bool,

    /// Largest accepted request body in bytes. Image payloads arrive inline.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_smtp_timeout() -> u64 {
    10
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: default_host(),
            port: default_port(),
            smtp_timeout: default_smtp_timeout(),
            verify_certs: false,
            body_limit: default_body_limit(),
        }
    }
}

impl Config {
    /// Load from `MAILHOOK_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::from_env_with_prefix(ENV_PREFIX)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn mailer_config(&self) -> MailerConfig {
        MailerConfig {
            timeout: Duration::from_secs(self.smtp_timeout),
            verify_certs: self.verify_certs,
        }
    }
}
