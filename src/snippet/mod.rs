//! Tracking markup sources.
//!
//! The injection layer treats the markup as opaque text: no templating, no
//! escaping, no validation of its contents happens here or downstream.

use std::sync::Arc;

/// Produces the ready-to-embed tracking markup for a response.
pub trait SnippetSource: Send + Sync {
    /// The markup text to splice into the HTML body.
    fn markup(&self) -> String;
}

/// A fixed markup string, typically taken from configuration.
#[derive(Debug, Clone)]
pub struct StaticSnippet {
    html: String,
}

impl StaticSnippet {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn shared(html: impl Into<String>) -> Arc<dyn SnippetSource> {
        Arc::new(Self::new(html))
    }
}

impl SnippetSource for StaticSnippet {
    fn markup(&self) -> String {
        self.html.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_snippet_returns_configured_markup() {
        let snippet = StaticSnippet::new("<script>X</script>");
        assert_eq!(snippet.markup(), "<script>X</script>");
    }
}
