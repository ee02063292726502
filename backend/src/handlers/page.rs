use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
};
use serde::Serialize;

use crate::AppState;
use crate::locale::MaybeLocale;

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub locale: Option<String>,
    pub default_locale: String,
    pub language_tag: Option<String>,
    pub path: String,
    pub query: Option<String>,
}

/// Catch-all page handler.
///
/// Echoes what the locale middleware forwarded so the downstream view of a
/// request can be inspected.
pub async fn page(
    State(state): State<Arc<AppState>>,
    MaybeLocale(locale): MaybeLocale,
    headers: HeaderMap,
    uri: Uri,
) -> Json<PageResponse> {
    let language_tag = headers
        .get(&state.language_header)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    tracing::debug!("Serving {} for locale {:?}", uri.path(), language_tag);

    Json(PageResponse {
        locale: locale.map(|l| l.0),
        default_locale: state.config.locale.default.clone(),
        language_tag,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    })
}
