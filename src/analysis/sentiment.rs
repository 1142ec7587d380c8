use serde::Serialize;

use super::tokenize;

const POSITIVE_WORDS: &[&str] = &[
    "great",
    "excellent",
    "amazing",
    "fantastic",
    "wonderful",
    "perfect",
];

const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "awful", "horrible", "disappointing"];

/// Score ceiling shared by sentiment and intent.
pub(crate) const MAX_SCORE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

/// Classify sentiment by counting whole-token hits in the word lists.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let tokens = tokenize(text);
    let positive = tokens.iter().filter(|t| POSITIVE_WORDS.contains(&t.as_str())).count();
    let negative = tokens.iter().filter(|t| NEGATIVE_WORDS.contains(&t.as_str())).count();

    let delta = positive as i64 - negative as i64;
    let magnitude = delta.unsigned_abs() as f64;

    match delta.signum() {
        1 => Sentiment {
            label: SentimentLabel::Positive,
            score: MAX_SCORE.min(0.6 + 0.1 * magnitude),
        },
        -1 => Sentiment {
            label: SentimentLabel::Negative,
            score: MAX_SCORE.min(0.6 + 0.1 * magnitude),
        },
        _ => Sentiment {
            label: SentimentLabel::Neutral,
            score: 0.5,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_positive_words() {
        let s = analyze_sentiment("This is a great and wonderful campaign");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(approx(s.score, 0.8));
    }

    #[test]
    fn no_sentiment_words_is_neutral() {
        let s = analyze_sentiment("Quarterly launch for the new product line");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.5);
    }

    #[test]
    fn negative_outweighs_positive() {
        let s = analyze_sentiment("great idea but awful timing and terrible budget");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(approx(s.score, 0.7));
    }

    #[test]
    fn balanced_words_are_neutral() {
        let s = analyze_sentiment("great results, bad weather");
        // "results," keeps its comma, "great" and "bad" cancel out.
        assert_eq!(s.label, SentimentLabel::Neutral);
    }

    #[test]
    fn score_is_capped() {
        let s = analyze_sentiment("great great great great great great");
        assert!(approx(s.score, 0.95));
    }

    #[test]
    fn matching_is_case_insensitive_but_whole_token() {
        assert_eq!(
            analyze_sentiment("AMAZING offer").label,
            SentimentLabel::Positive
        );
        assert_eq!(
            analyze_sentiment("amazing! offer").label,
            SentimentLabel::Neutral
        );
    }
}
