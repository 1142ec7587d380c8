/// Keyword analysis tests.
///
/// Exercises the analyzer through its public trait the way the wizard and
/// the `analyze` command use it.
use adpilot::analysis::{
    Analyzer, EntityKind, KeywordAnalyzer, SentimentLabel, analyze_if_ready, classify_intent,
};
use adpilot::store::Objective;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

#[test]
fn two_positive_words_score_point_eight() {
    let result = KeywordAnalyzer.analyze("A great and amazing product launch in California today");
    assert_eq!(result.sentiment.label, SentimentLabel::Positive);
    assert!(approx(result.sentiment.score, 0.8));
    assert_eq!(result.sentiment_display(), "POSITIVE (80.0%)");
}

#[test]
fn balanced_words_are_neutral() {
    let result = KeywordAnalyzer.analyze("great offer but terrible timing");
    assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
    assert!(approx(result.sentiment.score, 0.5));
}

#[test]
fn sentiment_is_capped() {
    let text = "great excellent amazing fantastic wonderful perfect great great";
    let result = KeywordAnalyzer.analyze(text);
    assert!(approx(result.sentiment.score, 0.95));
}

#[test]
fn negative_words_win_when_more_numerous() {
    let result = KeywordAnalyzer.analyze("bad awful results from last campaign");
    assert_eq!(result.sentiment.label, SentimentLabel::Negative);
    assert!(approx(result.sentiment.score, 0.8));
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

#[test]
fn lead_keywords_classify_as_lead_generation() {
    let intent = classify_intent("Collect leads through a newsletter signup form");
    assert_eq!(intent.category, Objective::LeadGeneration);
    assert!(approx(intent.confidence, 0.7));
}

#[test]
fn text_without_keywords_defaults_to_brand_awareness() {
    let result = KeywordAnalyzer.analyze("something entirely unrelated here");
    assert_eq!(result.intent.category, Objective::BrandAwareness);
    assert!(approx(result.intent.confidence, 0.3));
    assert_eq!(result.intent_display(), "BRAND AWARENESS (30.0% confidence)");
}

#[test]
fn ties_go_to_the_earlier_category() {
    let intent = classify_intent("drive traffic and engage people");
    assert_eq!(intent.category, Objective::Traffic);
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[test]
fn entities_follow_table_order() {
    let result = KeywordAnalyzer.analyze("daily budget for a tokyo launch");
    let kinds: Vec<EntityKind> = result.entities.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EntityKind::Location, EntityKind::Money, EntityKind::Date]
    );
    assert_eq!(result.entities[0].value, "tokyo");
    assert_eq!(result.entities[1].value, "budget");
    assert_eq!(result.entities[2].value, "daily");
}

#[test]
fn unmatched_text_has_no_entities() {
    let result = KeywordAnalyzer.analyze("plain words only");
    assert!(result.entities.is_empty());
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

#[test]
fn short_text_is_not_analyzed() {
    assert!(analyze_if_ready(&KeywordAnalyzer, "too short", 10).is_none());
    assert!(analyze_if_ready(&KeywordAnalyzer, "long enough", 10).is_some());
}

#[test]
fn analyzer_reports_model_labels() {
    let models = KeywordAnalyzer.models();
    assert!(!models.sentiment.is_empty());
    assert!(!models.ner.is_empty());
    assert!(!models.intent.is_empty());
}
