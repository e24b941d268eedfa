use thiserror::Error;

use crate::logging::LoggingError;
use crate::payload::PayloadError;

/// Unified result type for the menu engine.
pub type Result<T> = std::result::Result<T, MenuError>;

/// Errors surfaced by the menu engine.
///
/// Every variant except `Io` and `Terminal` marks a contract violation by the
/// menu author: the operation that produced it is aborted and the owning
/// [`GuiContext`](crate::GuiContext) switches to its error display.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("selection zone width must be non-zero")]
    InvalidZone,
    #[error("invalid menu configuration: {0}")]
    InvalidConfig(String),
    #[error("display range [{start}, {end}) is invalid for {total} displayable elements")]
    DisplayRange { start: usize, end: usize, total: usize },
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),
    #[error("listener `{element}` failed: {reason}")]
    Listener { element: String, reason: String },
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("parameter error: {0}")]
    Params(String),
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error("terminal backend error: {0}")]
    Terminal(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MenuError {
    /// Convenience constructor used by listeners reporting a broken invariant.
    pub fn listener(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Listener {
            element: element.into(),
            reason: reason.into(),
        }
    }
}
