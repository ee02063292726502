pub mod locale;
pub mod matcher;

pub use locale::{CookieSettings, LocaleState, locale_middleware};
pub use matcher::{PathMatcher, default_exclusions};
