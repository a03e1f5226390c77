use serde::Deserialize;

use super::{RenderError, Rendered};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextMessage {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarkdownMessage {
    pub content: String,
}

impl TextMessage {
    pub fn render(&self) -> Result<Rendered, RenderError> {
        let (title, body) = split_title(&self.content)?;
        let body = format!("<p>{}</p>", body.replace('\n', "<br>"));
        Ok(Rendered { title, body })
    }
}

impl MarkdownMessage {
    /// Markdown is shown as preformatted source, not converted.
    pub fn render(&self) -> Result<Rendered, RenderError> {
        let (title, body) = split_title(&self.content)?;
        let body = format!("<pre>{}</pre>", body);
        Ok(Rendered { title, body })
    }
}

/// Split content into its first line (the title) and the remaining lines.
///
/// Blank lines around the remainder are dropped. Single-line content uses the title
/// as its body.
fn split_title(content: &str) -> Result<(String, String), RenderError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(RenderError::EmptyContent);
    }

    let mut lines = content.lines();
    let title = lines.next().unwrap_or_default().trim().to_string();
    let rest: Vec<&str> = lines.collect();

    let first = rest.iter().position(|line| !line.trim().is_empty());
    let last = rest.iter().rposition(|line| !line.trim().is_empty());
    let body = match (first, last) {
        (Some(first), Some(last)) => rest[first..=last].join("\n"),
        _ => title.clone(),
    };

    Ok((title, body))
}
