//! Creative studio: prompt-driven simulated creative generation.

use chrono::Utc;
use serde::Deserialize;

use crate::error::DashboardError;
use crate::store::Creative;

pub const DEFAULT_STYLE: &str = "Modern";
pub const DEFAULT_FORMAT: &str = "Square (1:1)";

pub const STYLES: &[&str] = &["Modern", "Minimalist", "Bold", "Playful", "Professional"];
pub const FORMATS: &[&str] = &[
    "Square (1:1)",
    "Landscape (16:9)",
    "Portrait (9:16)",
    "Story (9:16)",
];

/// What the user asked for. Style and format may be left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreativeRequest {
    pub prompt: String,
    pub style: String,
    pub format: String,
}

impl CreativeRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            ..Self::default()
        }
    }

    pub fn style(&self) -> &str {
        non_blank(&self.style).unwrap_or(DEFAULT_STYLE)
    }

    pub fn format(&self) -> &str {
        non_blank(&self.format).unwrap_or(DEFAULT_FORMAT)
    }

    /// Reject a blank prompt before any work starts.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.prompt.trim().is_empty() {
            return Err(DashboardError::missing_input(
                "Missing Prompt",
                "Please enter a creative prompt",
            ));
        }
        Ok(())
    }

    pub fn into_creative(self, id: u64) -> Creative {
        Creative {
            id,
            style: self.style().to_string(),
            format: self.format().to_string(),
            prompt: self.prompt,
            created_at: Utc::now(),
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_is_missing_input() {
        for prompt in ["", "   "] {
            let err = CreativeRequest::new(prompt).validate().unwrap_err();
            assert_eq!(
                err,
                DashboardError::missing_input("Missing Prompt", "Please enter a creative prompt")
            );
        }
    }

    #[test]
    fn defaults_apply_to_blank_style_and_format() {
        let creative = CreativeRequest::new("Sunny beach sale").into_creative(1);
        assert_eq!(creative.title(), "Modern Square (1:1)");
        assert_eq!(creative.excerpt(), "Sunny beach sale...");
    }

    #[test]
    fn explicit_style_and_format() {
        let req = CreativeRequest {
            prompt: "x".repeat(60),
            style: "Bold".into(),
            format: "Story (9:16)".into(),
        };
        let creative = req.into_creative(2);
        assert_eq!(creative.title(), "Bold Story (9:16)");
        assert_eq!(creative.excerpt(), format!("{}...", "x".repeat(50)));
    }
}
