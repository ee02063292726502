pub mod error;
pub mod logging;

pub use error::{ApiError, ApiErrorResponse, LocaleError};
pub use logging::init_logging;
