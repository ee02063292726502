//! Locale redirect middleware
//!
//! Sends requests without a supported locale prefix to a prefixed URL.
//! Prefixed requests are forwarded with the locale attached as a header and
//! request extension, and the response refreshes the locale cookie.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::matcher::PathMatcher;
use crate::locale::{LocaleRedirector, ResolvedLocale, RouteDecision};
use crate::utils::ApiError;

/// Attributes of the outgoing locale cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub max_age_secs: u64,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl CookieSettings {
    pub fn build(&self, name: &str, value: &str) -> Cookie<'static> {
        let max_age = time::Duration::seconds(i64::try_from(self.max_age_secs).unwrap_or(i64::MAX));
        Cookie::build((name.to_string(), value.to_string()))
            .path("/")
            .max_age(max_age)
            .secure(self.secure)
            .http_only(self.http_only)
            .same_site(self.same_site)
            .build()
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self { max_age_secs: 31_536_000, secure: true, http_only: true, same_site: SameSite::Lax }
    }
}

#[derive(Clone)]
pub struct LocaleState {
    pub redirector: Arc<LocaleRedirector>,
    pub matcher: Arc<PathMatcher>,
    pub header_name: HeaderName,
    pub cookie: CookieSettings,
    pub permanent_redirect: bool,
}

pub async fn locale_middleware(
    State(state): State<LocaleState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.matcher.is_excluded(req.uri().path()) {
        tracing::trace!("Locale middleware skipping excluded path {}", req.uri().path());
        return Ok(next.run(req).await);
    }

    match state.redirector.route(req.uri(), req.headers()) {
        RouteDecision::Redirect { location } => {
            let value = HeaderValue::from_str(&location)
                .map_err(|_| ApiError::invalid_redirect(location.clone()))?;
            let status = if state.permanent_redirect {
                StatusCode::PERMANENT_REDIRECT
            } else {
                StatusCode::TEMPORARY_REDIRECT
            };
            Ok((status, [(header::LOCATION, value)]).into_response())
        },
        RouteDecision::PassThrough { locale } => {
            let value = HeaderValue::from_str(&locale)
                .map_err(|_| ApiError::invalid_header(format!("locale '{}'", locale)))?;
            req.headers_mut().insert(state.header_name.clone(), value);
            req.extensions_mut().insert(ResolvedLocale(locale.clone()));

            let response = next.run(req).await;

            let cookie = state.cookie.build(state.redirector.cookie_name(), &locale);
            Ok((CookieJar::new().add(cookie), response).into_response())
        },
    }
}
