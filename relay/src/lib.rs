//! Webhook-to-email relay.
//!
//! `POST /cgi-bin/webhook/send?key=<base64>` renders the JSON message in the body to
//! HTML and sends it through the SMTP server named by the key.

pub use mailhook_macros::HttpError;

pub mod config;
pub mod error;
pub mod key;
pub mod mail;
pub mod message;
pub mod relay;
pub mod routing;
mod serve;
pub mod wrap;

pub use config::{Config, EnvConfig};
pub use error::{ApiError, Reply};
pub use key::RoutingSpec;
pub use routing::{router, AppState};
pub use serve::serve;
