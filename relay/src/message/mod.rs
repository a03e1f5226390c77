//! Webhook message variants and their HTML rendering.
//!
//! The request body names its variant in `msgtype` and carries the payload under a
//! key of the same name:
//!
//! ```json
//! { "msgtype": "text", "text": { "content": "Disk almost full\nhost-3 at 97%" } }
//! ```
//!
//! Every variant renders to a [`Rendered`] subject/body pair or fails with a
//! [`RenderError`]; there is no partially rendered result.

mod html;
mod image;
mod news;
mod text;

pub use html::HtmlMessage;
pub use image::ImageMessage;
pub use news::{Article, NewsMessage};
pub use text::{MarkdownMessage, TextMessage};

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("unknown message type '{0}'")]
    UnknownMessageType(String),

    #[error("malformed message payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("message content is empty")]
    EmptyContent,

    #[error("missing image data or md5")]
    MissingImageData,

    #[error("news message has no articles")]
    NoArticles,
}

/// Email subject and HTML body produced from a message.
///
/// `body` is never empty. `title` is always set for text, markdown and image
/// messages; news and html messages pass the caller's title through, which may be
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    Text(TextMessage),
    Markdown(MarkdownMessage),
    Image(ImageMessage),
    News(NewsMessage),
    Html(HtmlMessage),
}

impl Message {
    /// Build the variant named by `msgtype` from the raw request body.
    pub fn parse(msgtype: &str, body: &[u8]) -> Result<Message, MessageError> {
        let message = match msgtype {
            "text" => Message::Text(nested(body, "text")?),
            "markdown" => Message::Markdown(nested(body, "markdown")?),
            "image" => Message::Image(nested(body, "image")?),
            "news" => Message::News(nested(body, "news")?),
            "html" => Message::Html(nested(body, "html")?),
            other => return Err(MessageError::UnknownMessageType(other.to_string())),
        };
        Ok(message)
    }

    pub fn msgtype(&self) -> &'static str {
        match self {
            Message::Text(_) => "text",
            Message::Markdown(_) => "markdown",
            Message::Image(_) => "image",
            Message::News(_) => "news",
            Message::Html(_) => "html",
        }
    }

    /// Raw HTML is delivered as the caller wrote it; everything else goes through
    /// [`crate::wrap::wrap_html`].
    pub fn wants_wrapper(&self) -> bool {
        !matches!(self, Message::Html(_))
    }

    pub fn render(&self) -> Result<Rendered, RenderError> {
        match self {
            Message::Text(m) => m.render(),
            Message::Markdown(m) => m.render(),
            Message::Image(m) => m.render_at(crate::wrap::local_now()),
            Message::News(m) => m.render(),
            Message::Html(m) => m.render(),
        }
    }
}

/// Deserialize the payload stored under `key`.
///
/// An absent or `null` payload yields the default (empty) payload, which the render
/// rules then reject.
fn nested<T>(body: &[u8], key: &str) -> Result<T, MessageError>
where
    T: DeserializeOwned + Default,
{
    let mut envelope: serde_json::Map<String, Value> = serde_json::from_slice(body)?;
    match envelope.remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(payload) => Ok(serde_json::from_value(payload)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<Message, MessageError> {
        let msgtype = body["msgtype"].as_str().unwrap_or_default().to_string();
        Message::parse(&msgtype, body.to_string().as_bytes())
    }

    #[test]
    fn parses_each_variant() {
        let cases = [
            (json!({"msgtype": "text", "text": {"content": "hi"}}), "text"),
            (json!({"msgtype": "markdown", "markdown": {"content": "# hi"}}), "markdown"),
            (json!({"msgtype": "image", "image": {"base64": "aGk=", "md5": "x"}}), "image"),
            (json!({"msgtype": "news", "news": {"articles": []}}), "news"),
            (json!({"msgtype": "html", "html": {"title": "t", "content": "<b>x</b>"}}), "html"),
        ];

        for (body, expected) in cases {
            let message = parse(body).unwrap();
            assert_eq!(message.msgtype(), expected);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = parse(json!({"msgtype": "voice", "voice": {}})).unwrap_err();
        assert!(matches!(err, MessageError::UnknownMessageType(t) if t == "voice"));
    }

    #[test]
    fn empty_type_is_unknown() {
        let err = Message::parse("", b"{}").unwrap_err();
        assert!(matches!(err, MessageError::UnknownMessageType(t) if t.is_empty()));
    }

    #[test]
    fn type_mismatch_is_malformed() {
        let err = parse(json!({"msgtype": "text", "text": {"content": 5}})).unwrap_err();
        assert!(matches!(err, MessageError::MalformedPayload(_)));
    }

    #[test]
    fn missing_payload_renders_as_empty() {
        let message = parse(json!({"msgtype": "text"})).unwrap();
        assert_eq!(message.render(), Err(RenderError::EmptyContent));

        let message = parse(json!({"msgtype": "news", "news": null})).unwrap();
        assert_eq!(message.render(), Err(RenderError::NoArticles));
    }

    #[test]
    fn only_html_skips_wrapper() {
        let html = parse(json!({"msgtype": "html", "html": {"content": "x"}})).unwrap();
        assert!(!html.wants_wrapper());

        let text = parse(json!({"msgtype": "text", "text": {"content": "x"}})).unwrap();
        assert!(text.wants_wrapper());
    }
}
