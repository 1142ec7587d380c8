use std::collections::BTreeSet;

use serde::Serialize;

use super::sentiment::MAX_SCORE;
use super::tokenize;
use crate::store::Objective;

/// Intent keyword table in declaration order. Ties resolve to the earlier
/// entry.
const INTENT_KEYWORDS: &[(Objective, &[&str])] = &[
    (
        Objective::BrandAwareness,
        &["brand", "awareness", "recognition", "visibility"],
    ),
    (
        Objective::LeadGeneration,
        &["lead", "leads", "contact", "signup", "subscribe"],
    ),
    (
        Objective::Conversions,
        &["convert", "sale", "purchase", "buy", "conversion"],
    ),
    (Objective::Traffic, &["traffic", "visit", "website", "click"]),
    (
        Objective::Engagement,
        &["engage", "like", "share", "comment", "interaction"],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intent {
    pub category: Objective,
    /// Number of distinct tokens that hit one of the category's keywords.
    pub hits: usize,
    pub confidence: f64,
}

/// Classify campaign intent.
///
/// A category scores one hit per distinct token that contains any of its
/// keywords as a substring, so "leads" counts once even though both `lead`
/// and `leads` occur in it, and repeating a word adds nothing.
pub fn classify_intent(text: &str) -> Intent {
    let tokens = tokenize(text);

    let mut best = (INTENT_KEYWORDS[0].0, 0usize);
    for (category, keywords) in INTENT_KEYWORDS {
        let hits = tokens
            .iter()
            .filter(|token| keywords.iter().any(|k| token.contains(k)))
            .map(|token| token.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        if hits > best.1 {
            best = (*category, hits);
        }
    }

    Intent {
        category: best.0,
        hits: best.1,
        confidence: MAX_SCORE.min(0.3 + 0.2 * best.1 as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn leads_and_signups() {
        let intent = classify_intent("We want more leads and signups");
        assert_eq!(intent.category, Objective::LeadGeneration);
        assert_eq!(intent.hits, 2);
        assert!(approx(intent.confidence, 0.7));
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let intent = classify_intent("buy buy buy buy today");
        assert_eq!(intent.category, Objective::Conversions);
        assert_eq!(intent.hits, 1);
        assert!(approx(intent.confidence, 0.5));
    }

    #[test]
    fn no_keywords_defaults_to_brand_awareness() {
        let intent = classify_intent("hello there friend");
        assert_eq!(intent.category, Objective::BrandAwareness);
        assert_eq!(intent.hits, 0);
        assert!(approx(intent.confidence, 0.3));
    }

    #[test]
    fn tie_keeps_first_declared_category() {
        // one brand hit, one traffic hit
        let intent = classify_intent("brand website");
        assert_eq!(intent.category, Objective::BrandAwareness);
        assert_eq!(intent.hits, 1);
    }

    #[test]
    fn later_category_wins_with_strictly_more_hits() {
        let intent = classify_intent("Drive website traffic and every click to our brand");
        assert_eq!(intent.category, Objective::Traffic);
        assert_eq!(intent.hits, 3);
    }

    #[test]
    fn substring_inside_token_counts() {
        // "purchases" contains "purchase"
        let intent = classify_intent("boost purchases");
        assert_eq!(intent.category, Objective::Conversions);
    }

    #[test]
    fn confidence_is_capped() {
        let intent = classify_intent("engage like share comment interaction engage");
        assert_eq!(intent.category, Objective::Engagement);
        assert!(approx(intent.confidence, 0.95));
    }
}
