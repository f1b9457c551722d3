use thiserror::Error;

use crate::ua;

#[allow(clippy::module_name_repetitions, reason = "matches status-code naming")]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{0}")]
pub struct Error(ua::StatusCode);

impl Error {
    #[must_use]
    pub fn new(status_code: ua::StatusCode) -> Self {
        debug_assert!(status_code.is_bad());
        Self(status_code)
    }

    /// Returns the underlying status code.
    #[must_use]
    pub const fn status_code(&self) -> ua::StatusCode {
        self.0
    }
}

impl From<ua::StatusCode> for Error {
    fn from(status_code: ua::StatusCode) -> Self {
        Self::new(status_code)
    }
}

/// Shorthand for results carrying OPC UA status codes as errors.
pub type Result<T> = std::result::Result<T, Error>;
