use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::middleware::default_exclusions;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub locale: LocaleConfig,
    pub cookie: CookieConfig,
    pub matcher: MatcherConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locale tags, in preference order
    pub supported: Vec<String>,
    /// Locale used when negotiation finds no match; must be in `supported`
    pub default: String,
    /// Request header carrying the resolved locale downstream
    pub header: String,
    /// Honor the locale cookie even when it names an unsupported tag
    pub trust_cookie: bool,
    /// Redirect with 308 instead of 307
    pub permanent_redirect: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    pub name: String,
    /// Cookie lifetime in seconds (accepts "31536000", "365d", "8760h")
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub max_age: u64,
    pub secure: bool,
    pub http_only: bool,
    /// "lax", "strict" or "none"
    pub same_site: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Regex patterns for paths that bypass locale handling
    pub exclude: Vec<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let mut config = match path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(config_path) => Self::from_toml(&config_path)?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,locale_gateway=debug")
    /// - APP_SUPPORTED_LOCALES: Comma separated locale tags (e.g., "en,de,fr")
    /// - APP_DEFAULT_LOCALE: Default locale tag
    /// - APP_TRUST_COOKIE: Honor unsupported cookie values (true/false)
    /// - APP_COOKIE_MAX_AGE: Cookie lifetime (accepts "31536000", "365d")
    /// - APP_COOKIE_SECURE: Set the Secure flag on the cookie (true/false)
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(locales) = std::env::var("APP_SUPPORTED_LOCALES") {
            self.locale.supported = parse_locale_list(&locales);
            tracing::info!("Override locale.supported from env: {:?}", self.locale.supported);
        }

        if let Ok(default) = std::env::var("APP_DEFAULT_LOCALE") {
            self.locale.default = default.trim().to_string();
            tracing::info!("Override locale.default from env: {}", self.locale.default);
        }

        if let Ok(trust) = std::env::var("APP_TRUST_COOKIE")
            && let Ok(val) = trust.parse()
        {
            self.locale.trust_cookie = val;
            tracing::info!("Override locale.trust_cookie from env: {}", self.locale.trust_cookie);
        }

        if let Ok(max_age) = std::env::var("APP_COOKIE_MAX_AGE") {
            match parse_duration_to_secs(&max_age) {
                Ok(val) => {
                    self.cookie.max_age = val;
                    tracing::info!("Override cookie.max_age from env: {}", self.cookie.max_age);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_COOKIE_MAX_AGE '{}': {} (keep {})",
                    max_age,
                    e,
                    self.cookie.max_age
                ),
            }
        }

        if let Ok(secure) = std::env::var("APP_COOKIE_SECURE")
            && let Ok(val) = secure.parse()
        {
            self.cookie.secure = val;
            tracing::info!("Override cookie.secure from env: {}", self.cookie.secure);
        }
    }

    /// Validate configuration
    ///
    /// Locale tags are checked in depth when the `SupportedLocales` set is
    /// built; this only rejects values no later stage can recover from.
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.locale.supported.is_empty() {
            anyhow::bail!("locale.supported must list at least one locale");
        }

        if !self.locale.supported.contains(&self.locale.default) {
            anyhow::bail!(
                "locale.default '{}' is not listed in locale.supported {:?}",
                self.locale.default,
                self.locale.supported
            );
        }

        if self.cookie.name.is_empty() {
            anyhow::bail!("cookie.name cannot be empty");
        }

        if self.cookie.max_age == 0 {
            anyhow::bail!("cookie.max_age must be > 0");
        }

        if self.cookie.same_site.eq_ignore_ascii_case("none") && !self.cookie.secure {
            tracing::warn!("cookie.same_site = \"none\" without cookie.secure will be rejected by browsers");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,locale_gateway=debug".to_string(), file: None }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "de".to_string(), "fr".to_string()],
            default: "en".to_string(),
            header: "x-language-tag".to_string(),
            trust_cookie: false,
            permanent_redirect: false,
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "language".to_string(),
            max_age: 31_536_000,
            secure: true,
            http_only: true,
            same_site: "lax".to_string(),
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { exclude: default_exclusions() }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_locale_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    let multiplier: u64 = match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hour" | "hours" => 60 * 60,
        "d" | "day" | "days" => 60 * 60 * 24,
        "w" | "week" | "weeks" => 60 * 60 * 24 * 7,
        _ => return Err(format!("unsupported unit: {}", unit)),
    };
    n.checked_mul(multiplier).ok_or_else(|| format!("duration too large: {}", input))
}

// Accept either a number of seconds or a human-friendly string
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '3600s', '12h', '365d'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
