//! Domain error taxonomy.
//!
//! Process boundaries (CLI handlers, HTTP handlers, file I/O) use
//! `anyhow::Result`. Everything below them reports one of these variants so
//! the presentation layer can decide between a toast, a log line, or a 4xx.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    /// A required user input was absent or unusable. Surfaced as a toast.
    #[error("{title}: {message}")]
    MissingInput { title: String, message: String },

    /// The expected rendering surface does not exist. Skipped and logged.
    #[error("rendering surface '{0}' not found")]
    SurfaceMissing(String),

    /// A chart spec could not be turned into a chart.
    #[error("failed to construct chart '{surface}': {reason}")]
    ChartConstruction { surface: String, reason: String },

    /// An operation was requested in a state that does not allow it.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    /// A simulated task was cancelled before completion.
    #[error("task '{0}' was cancelled")]
    Cancelled(String),
}

impl DashboardError {
    pub fn missing_input(title: &str, message: &str) -> Self {
        Self::MissingInput {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the error was caused by the user's input (HTTP 400) rather
    /// than by the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::InvalidTransition(_) | Self::UnknownSection(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_displays_title_and_message() {
        let err = DashboardError::missing_input("Missing Prompt", "Please enter a creative prompt");
        assert_eq!(
            err.to_string(),
            "Missing Prompt: Please enter a creative prompt"
        );
        assert!(err.is_user_error());
    }

    #[test]
    fn system_errors_are_not_user_errors() {
        assert!(!DashboardError::SurfaceMissing("funnelChart".into()).is_user_error());
        assert!(!DashboardError::Cancelled("deploy".into()).is_user_error());
    }
}
