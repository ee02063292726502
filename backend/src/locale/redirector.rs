//! Locale redirect decision
//!
//! Decides, per request, whether the path already carries a supported
//! locale prefix or has to be redirected to one.

use std::sync::Arc;

use axum::http::{HeaderMap, Uri, header::ACCEPT_LANGUAGE};
use axum_extra::extract::cookie::CookieJar;

use super::{LanguageMatcher, Negotiator, SupportedLocales};

/// Outcome of [`LocaleRedirector::route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Path lacks a supported prefix; send the client to `location`.
    Redirect { location: String },
    /// Path starts with `locale`; forward the request and refresh the cookie.
    PassThrough { locale: String },
}

pub struct LocaleRedirector {
    locales: Arc<SupportedLocales>,
    negotiator: Arc<dyn Negotiator>,
    cookie_name: String,
    trust_cookie: bool,
}

impl LocaleRedirector {
    pub fn new(locales: Arc<SupportedLocales>, cookie_name: impl Into<String>) -> Self {
        Self {
            locales,
            negotiator: Arc::new(LanguageMatcher),
            cookie_name: cookie_name.into(),
            trust_cookie: false,
        }
    }

    /// Swap the negotiation algorithm.
    pub fn with_negotiator(mut self, negotiator: Arc<dyn Negotiator>) -> Self {
        self.negotiator = negotiator;
        self
    }

    /// Use the locale cookie verbatim even when it names an unsupported tag.
    pub fn trust_cookie(mut self, trust: bool) -> Self {
        self.trust_cookie = trust;
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Best supported tag for the given header, or the default.
    pub fn negotiate(&self, accept_language: Option<&str>) -> &str {
        let matched = match accept_language {
            Some(header) => self.negotiator.negotiate(header, &self.locales),
            None => None,
        };

        match matched {
            Some(tag) if self.locales.contains(tag) => tag,
            Some(tag) => {
                tracing::warn!("Negotiator returned unsupported tag '{}', using default", tag);
                self.locales.default_locale()
            },
            None => self.locales.default_locale(),
        }
    }

    pub fn route(&self, uri: &Uri, headers: &HeaderMap) -> RouteDecision {
        let accept_language = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
        let negotiated = self.negotiate(accept_language);

        let path = uri.path();
        let segment = first_segment(path);

        if self.locales.contains(segment) {
            tracing::debug!("Path {} carries locale {}", path, segment);
            return RouteDecision::PassThrough { locale: segment.to_string() };
        }

        let jar = CookieJar::from_headers(headers);
        let cookie = jar.get(&self.cookie_name).map(|c| c.value());

        let chosen = match cookie {
            Some(value) if self.trust_cookie || self.locales.contains(value) => value,
            Some(value) => {
                tracing::warn!(
                    "Ignoring {} cookie with unsupported value '{}'",
                    self.cookie_name,
                    value
                );
                negotiated
            },
            None => negotiated,
        };

        let location = match uri.query() {
            Some(query) => format!("/{}{}?{}", chosen, path, query),
            None => format!("/{}{}", chosen, path),
        };

        tracing::debug!("Redirecting {} to {}", path, location);
        RouteDecision::Redirect { location }
    }
}

/// First path component after the leading slash; empty for `/`.
pub fn first_segment(path: &str) -> &str {
    path.split('/').nth(1).unwrap_or("")
}
