use std::fmt::Write;

use serde::Deserialize;

use super::{RenderError, Rendered};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub picurl: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsMessage {
    pub articles: Vec<Article>,
}

impl NewsMessage {
    /// Render the articles as a linked list.
    ///
    /// Article fields are interpolated without HTML escaping.
    pub fn render(&self) -> Result<Rendered, RenderError> {
        let first = self.articles.first().ok_or(RenderError::NoArticles)?;

        let mut body = String::from("<ul>");
        for article in &self.articles {
            let _ = write!(
                body,
                "<li><a href='{}'><img src='{}' alt='{}'></a><p>{}</p></li>",
                article.url, article.picurl, article.title, article.description
            );
        }
        body.push_str("</ul>");

        Ok(Rendered {
            title: first.title.clone(),
            body,
        })
    }
}
