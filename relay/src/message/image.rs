use serde::Deserialize;
use time::OffsetDateTime;

use super::{RenderError, Rendered};
use crate::wrap::format_timestamp;

/// Inline image. `md5` is required but not verified against the data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageMessage {
    pub base64: String,
    pub md5: String,
}

impl ImageMessage {
    /// Render with a title stamped at `now`. The data URI always claims PNG.
    pub fn render_at(&self, now: OffsetDateTime) -> Result<Rendered, RenderError> {
        if self.base64.is_empty() || self.md5.is_empty() {
            return Err(RenderError::MissingImageData);
        }

        let title = format!("Image Message - {}", format_timestamp(now));
        let body = format!(
            "<img src='data:image/png;base64,{}' alt='Image Message'/>",
            self.base64
        );
        Ok(Rendered { title, body })
    }
}
