//! Transient user notifications ("toasts").
//!
//! Operations push toasts into an [`Outbox`]; the presentation layer drains
//! it after each command and shows them for a few seconds.

use serde::Serialize;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Outbox {
    pending: Vec<Toast>,
}

impl Outbox {
    pub fn push(&mut self, kind: ToastKind, title: &str, message: impl Into<String>) {
        self.pending.push(Toast {
            kind,
            title: title.to_string(),
            message: message.into(),
        });
    }

    pub fn success(&mut self, title: &str, message: impl Into<String>) {
        self.push(ToastKind::Success, title, message);
    }

    /// Surface a user-input error as an error toast. Other errors are not
    /// shown to the user.
    pub fn report(&mut self, err: &DashboardError) {
        if let DashboardError::MissingInput { title, message } = err {
            self.push(ToastKind::Error, title, message.clone());
        }
    }

    pub fn pending(&self) -> &[Toast] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_outbox() {
        let mut outbox = Outbox::default();
        outbox.success("Upload Complete", "a.png uploaded successfully");
        outbox.push(ToastKind::Info, "Heads up", "info");

        let toasts = outbox.drain();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert!(outbox.pending().is_empty());
    }

    #[test]
    fn only_missing_input_is_reported() {
        let mut outbox = Outbox::default();
        outbox.report(&DashboardError::SurfaceMissing("trendsChart".into()));
        assert!(outbox.pending().is_empty());

        outbox.report(&DashboardError::missing_input(
            "Missing Prompt",
            "Please enter a creative prompt",
        ));
        assert_eq!(outbox.pending()[0].kind, ToastKind::Error);
        assert_eq!(outbox.pending()[0].title, "Missing Prompt");
    }

    #[test]
    fn icons() {
        assert_eq!(ToastKind::Success.icon(), "✓");
        assert_eq!(ToastKind::Warning.icon(), "⚠");
    }
}
