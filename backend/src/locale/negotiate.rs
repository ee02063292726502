//! Accept-Language negotiation
//!
//! Matches the client's ranked language ranges against the supported set.
//! The matcher is a trait so the redirector can run with a stub in tests.

use unic_langid::LanguageIdentifier;

use super::SupportedLocales;

/// Picks a supported tag for a raw `Accept-Language` value.
///
/// Returns `None` when nothing matches; callers fall back to the default.
/// Implementations must not panic on malformed input.
pub trait Negotiator: Send + Sync {
    fn negotiate<'a>(&self, accept_language: &str, supported: &'a SupportedLocales)
    -> Option<&'a str>;
}

/// RFC 4647 lookup with a basename fallback.
///
/// Ranges are tried in quality order. For each range an exact match wins,
/// then a region-less supported tag of the same language and script
/// (`de-DE` -> `de`), then any supported tag of the same language
/// (`de` -> `de-AT`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageMatcher;

impl Negotiator for LanguageMatcher {
    fn negotiate<'a>(
        &self,
        accept_language: &str,
        supported: &'a SupportedLocales,
    ) -> Option<&'a str> {
        parse_accept_language(accept_language)
            .iter()
            .find_map(|requested| best_for_range(requested, supported))
    }
}

/// Parse a header into identifiers ordered by descending quality.
///
/// Ranges with `q=0` are refused by the client and dropped, as are
/// wildcards and ranges that are not valid language tags.
pub fn parse_accept_language(header: &str) -> Vec<LanguageIdentifier> {
    let mut ranges: Vec<(String, f32)> = accept_language::parse_with_quality(header)
        .into_iter()
        .filter(|(range, quality)| *quality > 0.0 && !range.is_empty() && range != "*")
        .collect();
    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranges
        .into_iter()
        .filter_map(|(range, _)| range.parse::<LanguageIdentifier>().ok())
        .collect()
}

fn best_for_range<'a>(
    requested: &LanguageIdentifier,
    supported: &'a SupportedLocales,
) -> Option<&'a str> {
    if let Some((tag, _)) = supported.entries().find(|(_, id)| *id == requested) {
        return Some(tag);
    }

    let basename = supported.entries().find(|(_, id)| {
        id.language == requested.language
            && id.region.is_none()
            && (id.script.is_none() || id.script == requested.script)
    });
    if let Some((tag, _)) = basename {
        return Some(tag);
    }

    supported
        .entries()
        .find(|(_, id)| id.language == requested.language)
        .map(|(tag, _)| tag)
}
