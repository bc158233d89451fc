//! End-to-end injection tests driving the router in-process.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;

use tracking_inject::config::TrackingConfig;
use tracking_inject::http::server::build_router;
use tracking_inject::http::{inject_tracking, TrackingState};

fn tracking_config(insertion: &str) -> TrackingConfig {
    TrackingConfig {
        enabled: true,
        insertion: insertion.to_string(),
        snippet: "<script>X</script>".to_string(),
    }
}

fn demo_app(config: &TrackingConfig) -> Router {
    build_router(TrackingState::from_config(config).unwrap())
}

/// Wrap an arbitrary router with the injection layer.
fn wrap(router: Router, config: &TrackingConfig) -> Router {
    let state = TrackingState::from_config(config).unwrap();
    router.layer(middleware::from_fn_with_state(state, inject_tracking))
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn html_page_gets_snippet_before_closing_body_tag() {
    let app = demo_app(&tracking_config("bottom"));

    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_length: usize = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("<h1>Hello</h1>\n\n<script>X</script></body>"));
    // Exactly one insertion per response.
    assert_eq!(body.matches("<script>X</script>").count(), 1);
    assert_eq!(content_length, body.len());
}

#[tokio::test]
async fn top_position_inserts_after_opening_body_tag() {
    let app = demo_app(&tracking_config("top"));

    let response = app.oneshot(get_request("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("<body>\n<script>X</script>\n<h1>Hello</h1>"));
}

#[tokio::test]
async fn json_endpoint_is_left_untouched() {
    let app = demo_app(&tracking_config("bottom"));

    let response = app.oneshot(get_request("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn xhr_request_is_left_untouched() {
    let app = demo_app(&tracking_config("bottom"));

    let request = Request::builder()
        .uri("/")
        .header("x-requested-with", "XMLHttpRequest")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let body = body_string(response).await;
    assert!(!body.contains("<script>X</script>"));
}

#[tokio::test]
async fn head_request_is_left_untouched() {
    let app = demo_app(&tracking_config("bottom"));

    let request = Request::builder()
        .method(Method::HEAD)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let body = body_string(response).await;
    assert!(!body.contains("<script>X</script>"));
}

#[tokio::test]
async fn disabled_tracking_is_left_untouched() {
    let mut config = tracking_config("bottom");
    config.enabled = false;
    let app = demo_app(&config);

    let response = app.oneshot(get_request("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("<script>X</script>"));
}

#[tokio::test]
async fn captured_render_mode_is_left_untouched() {
    let app = demo_app(&tracking_config("bottom"));

    let response = app.oneshot(get_request("/captured")).await.unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("<script>X</script>"));
}

#[tokio::test]
async fn not_modified_is_left_untouched() {
    async fn cached() -> Response {
        (
            StatusCode::NOT_MODIFIED,
            [(header::CONTENT_TYPE, "text/html")],
            "",
        )
            .into_response()
    }

    let app = wrap(
        Router::new().route("/cached", get(cached)),
        &tracking_config("bottom"),
    );

    let response = app.oneshot(get_request("/cached")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);

    let body = body_string(response).await;
    assert!(!body.contains("<script>X</script>"));
}

#[tokio::test]
async fn tag_free_fragment_gets_snippet_appended() {
    async fn fragment() -> Html<&'static str> {
        Html("<div>Hi</div>")
    }

    let app = wrap(
        Router::new().route("/fragment", get(fragment)),
        &tracking_config("bottom"),
    );

    let response = app.oneshot(get_request("/fragment")).await.unwrap();
    let body = body_string(response).await;
    assert_eq!(body, "<div>Hi</div>\n<script>X</script>");
}

#[tokio::test]
async fn mixed_case_body_tags_are_matched() {
    async fn shouting() -> Html<&'static str> {
        Html("<HTML><BODY>Hello</BODY></HTML>")
    }

    let app = wrap(
        Router::new().route("/shouting", get(shouting)),
        &tracking_config("bottom"),
    );

    let response = app.oneshot(get_request("/shouting")).await.unwrap();
    let body = body_string(response).await;
    assert_eq!(body, "<HTML><BODY>Hello\n<script>X</script></BODY></HTML>");
}
