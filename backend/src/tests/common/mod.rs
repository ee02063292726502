// Common test utilities and helpers

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, header},
    response::Response,
};
use tower::ServiceExt;

use crate::config::Config;
use crate::{build_locale_state, build_router};

/// Router over the default configuration: en, de, fr with en as default
pub fn test_router() -> Router {
    router_with(Config::default())
}

pub fn router_with(config: Config) -> Router {
    let state = build_locale_state(&config).expect("Failed to build locale state");
    build_router(Arc::new(config), state)
}

/// Build a GET request with the given headers
pub fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

pub async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.expect("Router is infallible")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub fn location(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
}

pub fn set_cookie(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok())
}
