//! Locale model for the gateway
//!
//! The supported locale set is fixed at start-up and shared read-only by
//! every request. Negotiation and the redirect decision live in the
//! submodules.

pub mod negotiate;
pub mod redirector;

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use unic_langid::LanguageIdentifier;

use crate::utils::LocaleError;

pub use negotiate::{LanguageMatcher, Negotiator};
pub use redirector::{LocaleRedirector, RouteDecision};

/// Ordered set of locale tags the site is served in, with a distinguished default.
#[derive(Debug, Clone)]
pub struct SupportedLocales {
    tags: Vec<String>,
    identifiers: Vec<LanguageIdentifier>,
    default_index: usize,
}

impl SupportedLocales {
    /// Validate and build the set. Tags keep their configured spelling; the
    /// parsed identifiers are only used for negotiation.
    pub fn new<I, S>(tags: I, default: &str) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        let mut identifiers = Vec::new();

        for tag in tags {
            let tag = tag.into();
            if seen.contains(&tag) {
                return Err(LocaleError::DuplicateTag(tag));
            }
            let identifier: LanguageIdentifier =
                tag.parse().map_err(|_| LocaleError::InvalidTag(tag.clone()))?;
            identifiers.push(identifier);
            seen.push(tag);
        }

        if seen.is_empty() {
            return Err(LocaleError::NoSupportedLocales);
        }

        let default_index = seen
            .iter()
            .position(|t| t == default)
            .ok_or_else(|| LocaleError::DefaultNotSupported(default.to_string()))?;

        Ok(Self { tags: seen, identifiers, default_index })
    }

    pub fn default_locale(&self) -> &str {
        &self.tags[self.default_index]
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Tags paired with their parsed identifiers, in configured order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LanguageIdentifier)> {
        self.tags.iter().map(String::as_str).zip(self.identifiers.iter())
    }
}

/// Locale taken from the path prefix of the current request.
///
/// Present in request extensions only after the locale middleware let the
/// request through. Extraction is rejected elsewhere; see [`MaybeLocale`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

impl ResolvedLocale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResolvedLocale
where
    S: Send + Sync,
{
    type Rejection = (axum::http::StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<ResolvedLocale>().cloned().ok_or((
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Locale middleware is not installed for this route",
        ))
    }
}

/// Optional variant for handlers that are reachable both with and without
/// the locale prefix.
#[derive(Debug, Clone)]
pub struct MaybeLocale(pub Option<ResolvedLocale>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeLocale(parts.extensions.get::<ResolvedLocale>().cloned()))
    }
}
