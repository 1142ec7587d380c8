//! Simulated text analysis for campaign descriptions.
//!
//! Everything here is a keyword lookup: sentiment from two word lists,
//! intent from five keyword tables, entities from three more. No model is
//! ever loaded. The [`Analyzer`] trait is the seam where a real classifier
//! could later be plugged in; [`KeywordAnalyzer`] is the only
//! implementation.

pub mod entities;
pub mod intent;
pub mod sentiment;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use entities::{Entity, EntityKind, extract_entities};
pub use intent::{Intent, classify_intent};
pub use sentiment::{Sentiment, SentimentLabel, analyze_sentiment};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase and split on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WHITESPACE_RE
        .split(lower.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub entities: Vec<Entity>,
}

impl Analysis {
    /// `"POSITIVE (80.0%)"`
    pub fn sentiment_display(&self) -> String {
        format!(
            "{} ({})",
            self.sentiment.label,
            format_percent(self.sentiment.score)
        )
    }

    /// `"LEAD GENERATION (70.0% confidence)"`
    pub fn intent_display(&self) -> String {
        format!(
            "{} ({} confidence)",
            intent_label(self.intent.category.key()),
            format_percent(self.intent.confidence)
        )
    }
}

/// Format a 0..1 score as a percentage with one decimal.
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Display label for an intent key: first underscore becomes a space, then
/// uppercase (`brand_awareness` → `BRAND AWARENESS`).
pub fn intent_label(key: &str) -> String {
    key.replacen('_', " ", 1).to_uppercase()
}

// ---------------------------------------------------------------------------
// Analyzer strategy
// ---------------------------------------------------------------------------

/// Model names shown in the UI next to each analysis. Labels only; nothing
/// is downloaded or invoked.
#[derive(Debug, Clone, Serialize)]
pub struct ModelCatalog {
    pub sentiment: &'static str,
    pub ner: &'static str,
    pub intent: &'static str,
}

pub const PLACEHOLDER_MODELS: ModelCatalog = ModelCatalog {
    sentiment: "distilbert-base-uncased-finetuned-sst-2-english",
    ner: "dbmdz/bert-large-cased-finetuned-conll03-english",
    intent: "microsoft/DialoGPT-medium",
};

pub trait Analyzer {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Model labels to display alongside results.
    fn models(&self) -> &ModelCatalog;

    /// Analyze free text. Never fails: unmatched input yields a neutral,
    /// default-intent, entity-free result.
    fn analyze(&self, text: &str) -> Analysis;
}

/// Keyword-table analyzer.
#[derive(Debug, Clone, Default)]
pub struct KeywordAnalyzer;

impl Analyzer for KeywordAnalyzer {
    fn name(&self) -> &str {
        "keyword"
    }

    fn models(&self) -> &ModelCatalog {
        &PLACEHOLDER_MODELS
    }

    fn analyze(&self, text: &str) -> Analysis {
        let tokens = tokenize(text);
        Analysis {
            sentiment: analyze_sentiment(text),
            intent: classify_intent(text),
            entities: extract_entities(&tokens),
        }
    }
}

/// Run the analyzer only when the text is long enough to be worth it.
///
/// Returns `None` for text shorter than `min_len` characters, which the
/// presentation layer treats as "hide the result panel".
pub fn analyze_if_ready(analyzer: &dyn Analyzer, text: &str, min_len: usize) -> Option<Analysis> {
    is_ready(text, min_len).then(|| analyzer.analyze(text))
}

/// Whether `text` has at least `min_len` characters.
pub fn is_ready(text: &str, min_len: usize) -> bool {
    text.chars().count() >= min_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Objective;

    #[test]
    fn tokenize_collapses_whitespace_and_lowercases() {
        assert_eq!(
            tokenize("  Great\tCampaign \n NOW "),
            vec!["great", "campaign", "now"]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn short_text_is_not_analyzed() {
        let analyzer = KeywordAnalyzer;
        assert!(analyze_if_ready(&analyzer, "too short", 10).is_none());
        assert!(analyze_if_ready(&analyzer, "long enough", 10).is_some());
    }

    #[test]
    fn readiness_counts_characters_not_bytes() {
        assert!(is_ready("ééééé", 5));
        assert!(!is_ready("éééé", 5));
        assert!(is_ready("", 0));
    }

    #[test]
    fn unmatched_text_yields_defaults() {
        let analysis = KeywordAnalyzer.analyze("nothing to see here at all");
        assert_eq!(analysis.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(analysis.intent.category, Objective::BrandAwareness);
        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn display_helpers_match_dashboard_format() {
        let analysis = KeywordAnalyzer.analyze("We want more leads and signups, a great plan");
        assert_eq!(analysis.sentiment_display(), "POSITIVE (70.0%)");
        assert_eq!(
            analysis.intent_display(),
            "LEAD GENERATION (70.0% confidence)"
        );
    }

    #[test]
    fn intent_label_replaces_first_underscore() {
        assert_eq!(intent_label("brand_awareness"), "BRAND AWARENESS");
        assert_eq!(intent_label("traffic"), "TRAFFIC");
    }

    #[test]
    fn analysis_serializes_with_wire_names() {
        let analysis = KeywordAnalyzer.analyze("global budget this week is great");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["sentiment"]["label"], "POSITIVE");
        assert_eq!(json["intent"]["category"], "brand_awareness");
        assert_eq!(json["entities"][0]["type"], "LOCATION");
        assert_eq!(json["entities"][0]["value"], "global");
    }

    #[test]
    fn keyword_analyzer_exposes_placeholder_models() {
        let analyzer = KeywordAnalyzer;
        assert_eq!(analyzer.name(), "keyword");
        assert_eq!(analyzer.models().intent, "microsoft/DialoGPT-medium");
    }
}
