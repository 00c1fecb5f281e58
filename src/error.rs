use thiserror::Error;

use crate::cookies::CookieParseError;
use crate::target::TargetError;
use crate::viewport::ViewportParseError;

/// Errors raised by the render pipeline.
///
/// Every failure is terminal for the invocation: there is no retry at any
/// stage. Validation failures are detected before a browser is launched;
/// the remaining variants map to the launch, navigation, capture, and
/// session-management stages of the pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} did not reach '{wait_until}' within {timeout_ms}ms")]
    NavigationTimeout {
        url: String,
        wait_until: String,
        timeout_ms: u64,
    },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("Browser session error: {0}")]
    Session(String),
}

impl RenderError {
    pub fn validation(message: impl Into<String>) -> Self {
        RenderError::Validation(message.into())
    }
}

impl From<CookieParseError> for RenderError {
    fn from(err: CookieParseError) -> Self {
        RenderError::Validation(err.to_string())
    }
}

impl From<TargetError> for RenderError {
    fn from(err: TargetError) -> Self {
        RenderError::Validation(err.to_string())
    }
}

impl From<ViewportParseError> for RenderError {
    fn from(err: ViewportParseError) -> Self {
        RenderError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
