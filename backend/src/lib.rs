//! Locale gateway
//!
//! An axum service whose pipeline makes every page URL carry a supported
//! locale prefix. Requests without one are redirected to the visitor's
//! preferred locale (cookie first, then `Accept-Language`); requests with
//! one are forwarded with the locale attached and the cookie refreshed.

pub mod config;
pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, http::HeaderName, middleware::from_fn_with_state, routing::get};
use axum_extra::extract::cookie::SameSite;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::locale::{LocaleRedirector, SupportedLocales};
use crate::middleware::{CookieSettings, LocaleState, PathMatcher, locale_middleware};
use crate::utils::LocaleError;

pub struct AppState {
    pub config: Arc<Config>,
    pub language_header: HeaderName,
}

/// Build the locale middleware state from validated configuration.
pub fn build_locale_state(config: &Config) -> Result<LocaleState, anyhow::Error> {
    let locales = SupportedLocales::new(config.locale.supported.iter().cloned(), &config.locale.default)
        .context("Invalid [locale] configuration")?;

    let redirector = LocaleRedirector::new(Arc::new(locales), config.cookie.name.clone())
        .trust_cookie(config.locale.trust_cookie);

    let matcher = PathMatcher::new(&config.matcher.exclude).context("Invalid [matcher] configuration")?;

    Ok(LocaleState {
        redirector: Arc::new(redirector),
        matcher: Arc::new(matcher),
        header_name: parse_header_name(&config.locale.header)?,
        cookie: CookieSettings {
            max_age_secs: config.cookie.max_age,
            secure: config.cookie.secure,
            http_only: config.cookie.http_only,
            same_site: parse_same_site(&config.cookie.same_site),
        },
        permanent_redirect: config.locale.permanent_redirect,
    })
}

/// Assemble the application router with the locale layer in front of pages.
pub fn build_router(config: Arc<Config>, locale_state: LocaleState) -> Router {
    let app_state = Arc::new(AppState {
        config,
        language_header: locale_state.header_name.clone(),
    });

    Router::new()
        .route("/api/health", get(handlers::health))
        .fallback(handlers::page)
        .with_state(app_state)
        .layer(from_fn_with_state(locale_state, locale_middleware))
        .layer(TraceLayer::new_for_http())
}

fn parse_header_name(name: &str) -> Result<HeaderName, LocaleError> {
    HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes())
        .map_err(|_| LocaleError::InvalidHeaderName(name.to_string()))
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        "lax" => SameSite::Lax,
        other => {
            tracing::warn!("Unknown cookie.same_site '{}', using lax", other);
            SameSite::Lax
        },
    }
}
