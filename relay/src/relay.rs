//! Request orchestration: key → message → HTML → SMTP.

use serde::Deserialize;

use crate::error::ApiError;
use crate::key::RoutingSpec;
use crate::mail::{Email, Mailer};
use crate::message::Message;
use crate::wrap::wrap_html;

#[derive(Deserialize)]
struct Discriminator {
    #[serde(default)]
    msgtype: String,
}

/// What was sent, for logging and tests.
#[derive(Debug, Clone)]
pub struct Delivered {
    pub msgtype: &'static str,
    pub email: Email,
}

/// Relay one webhook request.
///
/// The message is fully rendered before the mailer is called, so a request either
/// fails without side effects or makes exactly one delivery attempt.
pub async fn relay(
    mailer: &dyn Mailer,
    key: Option<&str>,
    body: &[u8],
) -> Result<Delivered, ApiError> {
    let key = key.filter(|k| !k.is_empty()).ok_or(ApiError::MissingKey)?;
    let route = RoutingSpec::decode(key)?;

    let Discriminator { msgtype } =
        serde_json::from_slice(body).map_err(ApiError::InvalidBody)?;

    let message = Message::parse(&msgtype, body)?;
    let rendered = message.render()?;

    let html = if message.wants_wrapper() {
        wrap_html(&rendered.body)
    } else {
        rendered.body
    };

    let email = Email::html(
        &route.from_address,
        &route.to_address,
        rendered.title,
        html,
    );

    tracing::info!(
        to = %email.to,
        msgtype = message.msgtype(),
        title = %email.subject,
        from = %email.from,
        "sending email"
    );

    mailer.send(&route, &email).await?;

    Ok(Delivered {
        msgtype: message.msgtype(),
        email,
    })
}
