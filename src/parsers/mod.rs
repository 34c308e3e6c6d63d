pub mod html;

#[cfg(test)]
mod tests;

pub use html::extract_summary;

/// Kind of content a fetched page holds, judged from its Content-Type header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML document that can be summarized
    Html,
    /// Anything else
    Other,
}

impl ContentKind {
    /// Determines the content kind from a Content-Type header value
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type.trim_start().to_ascii_lowercase();
        if mime.starts_with("text/html") {
            ::log::debug!("Classifying as HTML: {}", content_type);
            ContentKind::Html
        } else {
            ::log::debug!("Classifying as Other: {:?}", content_type);
            ContentKind::Other
        }
    }

    /// Returns if the content can be summarized
    pub fn is_html(&self) -> bool {
        matches!(self, ContentKind::Html)
    }
}
