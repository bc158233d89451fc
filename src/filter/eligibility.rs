//! Per-response eligibility check.

/// How the handler intends its output to be delivered.
///
/// Handlers may attach a `RenderMode` to the response extensions; a response
/// without one is treated as [`RenderMode::Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Output goes directly to the client. The only trackable mode.
    #[default]
    Client,
    /// Output is captured by the application instead of being sent.
    Captured,
    /// No output is rendered.
    Suppressed,
}

/// Facts about the current request/response pair that eligibility reads.
///
/// Built by the HTTP adapter once the downstream stack has finished; kept as
/// an explicit struct so the predicate can be exercised with constructed
/// values.
#[derive(Debug, Clone, Default)]
pub struct ResponseFacts {
    /// Request carried `X-Requested-With: XMLHttpRequest`.
    pub xhr: bool,
    /// Raw `Content-Type` response header value, if any.
    pub content_type: Option<String>,
    /// HTTP status code.
    pub status: u16,
    /// Delivery mode declared by the handler.
    pub render_mode: RenderMode,
    /// The response has no body to mutate (HEAD request).
    pub headers_only: bool,
}

/// Test whether the tracking snippet should be inserted for this response.
///
/// Skips insertion:
/// * if tracking is not enabled
/// * for XHR requests
/// * if the content type is not HTML
/// * for 304 Not Modified
/// * if not rendering to the client
/// * for headers-only responses
pub fn is_trackable(enabled: bool, facts: &ResponseFacts) -> bool {
    let html = facts
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("html"));

    !(!enabled
        || facts.xhr
        || !html
        || facts.status == 304
        || facts.render_mode != RenderMode::Client
        || facts.headers_only)
}
