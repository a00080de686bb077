/*!
 * Error types for the showcase application.
 *
 * This module contains custom error types for the presentation surface,
 * the delay primitive and the section orchestrator, using the thiserror
 * crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by a presentation surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The page was configured a second time
    #[error("Page configuration attempted twice")]
    AlreadyConfigured,

    /// The page was configured after something had been rendered
    #[error("Page configuration attempted after rendering began")]
    ConfigureAfterRender,

    /// Something was rendered before the page was configured
    #[error("Rendering attempted before the page was configured")]
    NotConfigured,

    /// A progress value outside 0..=100 was reported
    #[error("Progress value out of range: {0} (expected 0..=100)")]
    ProgressOutOfRange(u8),

    /// A widget was declared with inconsistent parameters or stored value
    #[error("Invalid widget '{label}': {reason}")]
    InvalidWidget {
        /// Widget label
        label: String,
        /// What was wrong with it
        reason: String,
    },

    /// Writing to the output sink failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl SurfaceError {
    /// Whether this error comes from violating the page initialization order
    pub fn is_initialization_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyConfigured | Self::ConfigureAfterRender | Self::NotConfigured
        )
    }
}

/// Errors raised by a delay primitive
#[derive(Error, Debug)]
pub enum DelayError {
    /// The blocking wait was aborted by the hosting environment
    #[error("Delay interrupted: {0}")]
    Interrupted(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the presentation surface
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Error from a blocking wait
    #[error("Delay error: {0}")]
    Delay(#[from] DelayError),
}
