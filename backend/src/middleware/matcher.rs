use regex::RegexSet;

use crate::utils::LocaleError;

/// Paths the locale middleware never touches (API routes, static assets).
#[derive(Debug, Clone)]
pub struct PathMatcher {
    excluded: RegexSet,
}

impl PathMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded =
            RegexSet::new(patterns).map_err(|e| LocaleError::InvalidPattern(e.to_string()))?;
        Ok(Self { excluded })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.is_match(path)
    }
}

pub fn default_exclusions() -> Vec<String> {
    [
        r"^/api(/|$)",
        r"^/_next/static(/|$)",
        r"^/_next/image(/|$)",
        r"^/static(/|$)",
        r"^/favicon\.ico$",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
