use serde::Deserialize;

use super::{RenderError, Rendered};

/// Caller-authored HTML, delivered verbatim and never wrapped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HtmlMessage {
    pub title: String,
    pub content: String,
}

impl HtmlMessage {
    pub fn render(&self) -> Result<Rendered, RenderError> {
        if self.content.is_empty() {
            return Err(RenderError::EmptyContent);
        }
        Ok(Rendered {
            title: self.title.clone(),
            body: self.content.clone(),
        })
    }
}
