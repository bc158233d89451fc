//! Tracking snippet injection middleware.
//!
//! Runs as a post-processing step: the rest of the stack produces the
//! response first, then this layer decides eligibility and splices the
//! configured markup into the HTML body.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::schema::TrackingConfig;
use crate::filter::eligibility::{is_trackable, RenderMode, ResponseFacts};
use crate::filter::insertion::{InsertPosition, UnrecognizedPosition};
use crate::snippet::{SnippetSource, StaticSnippet};

/// State injected into the middleware.
///
/// Built from a validated [`TrackingConfig`]; the insertion position is
/// resolved here, so an unrecognized name fails construction and the
/// per-request path cannot fail on it.
#[derive(Clone)]
pub struct TrackingState {
    enabled: bool,
    position: InsertPosition,
    snippet: Arc<dyn SnippetSource>,
}

impl TrackingState {
    /// Create middleware state with the markup taken from configuration.
    pub fn from_config(config: &TrackingConfig) -> Result<Self, UnrecognizedPosition> {
        Self::with_source(config, StaticSnippet::shared(config.snippet.clone()))
    }

    /// Create middleware state with a custom snippet source.
    pub fn with_source(
        config: &TrackingConfig,
        snippet: Arc<dyn SnippetSource>,
    ) -> Result<Self, UnrecognizedPosition> {
        Ok(Self {
            enabled: config.enabled,
            position: config.insertion.parse()?,
            snippet,
        })
    }
}

pub async fn inject_tracking(
    State(state): State<TrackingState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Request-side facts, recorded before the request is consumed.
    let xhr = is_xhr(req.headers());
    let headers_only = req.method() == Method::HEAD;

    // Let the rest of the stack fully populate the response first.
    let response = next.run(req).await;

    let facts = ResponseFacts {
        xhr,
        content_type: response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        status: response.status().as_u16(),
        render_mode: response
            .extensions()
            .get::<RenderMode>()
            .copied()
            .unwrap_or_default(),
        headers_only,
    };

    if !is_trackable(state.enabled, &facts) {
        tracing::info!("tracking snippet not inserted");
        return response;
    }

    tracing::info!(position = %state.position, "inserting tracking snippet");

    let markup = format!("\n{}", state.snippet.markup());

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            // The original body is gone at this point; all we can do is
            // report the failure upstream.
            tracing::error!(error = %e, "failed to buffer response body");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Response body error").into_response();
        }
    };

    let new_body = match std::str::from_utf8(&bytes) {
        Ok(text) => state.position.apply(text, &markup),
        Err(_) => {
            tracing::debug!("response body is not valid UTF-8, leaving it untouched");
            return Response::from_parts(parts, Body::from(bytes));
        }
    };

    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(new_body.len()));
    Response::from_parts(parts, Body::from(new_body))
}

fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xhr_detection_reads_x_requested_with() {
        let mut headers = HeaderMap::new();
        assert!(!is_xhr(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_xhr(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("xmlhttprequest"));
        assert!(is_xhr(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("Fetch"));
        assert!(!is_xhr(&headers));
    }

    #[test]
    fn state_construction_rejects_unrecognized_position() {
        let config = TrackingConfig {
            enabled: true,
            insertion: "middle".to_string(),
            snippet: "<script>X</script>".to_string(),
        };
        let err = TrackingState::from_config(&config).err().unwrap();
        assert_eq!(err, UnrecognizedPosition("middle".to_string()));
    }
}
