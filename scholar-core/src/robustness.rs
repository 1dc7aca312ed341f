//! Classifier robustness suite.
//!
//! A fixed set of inputs grouped by kind, sent to the batch classification
//! endpoint in one request and scored against their expected categories.

use crate::types::{BatchClassifyResponse, BatchOutcome};

/// The service classifies at most this many texts per batch.
pub const BATCH_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseGroup {
    ShortInput,
    LongInput,
    StopwordHeavy,
    MixedTopic,
    EdgeCase,
}

impl CaseGroup {
    pub fn title(&self) -> &'static str {
        match self {
            CaseGroup::ShortInput => "Short inputs",
            CaseGroup::LongInput => "Long inputs",
            CaseGroup::StopwordHeavy => "Stopword heavy",
            CaseGroup::MixedTopic => "Mixed topics",
            CaseGroup::EdgeCase => "Edge cases",
        }
    }

    /// Groups whose concrete expectations count towards accuracy.
    pub fn is_scored(&self) -> bool {
        matches!(
            self,
            CaseGroup::ShortInput | CaseGroup::LongInput | CaseGroup::StopwordHeavy
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Category(&'static str),
    /// Input carries no topical signal.
    Unknown,
    /// Input spans several categories.
    Mixed,
    /// Only graceful handling is checked.
    Handled { description: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobustnessCase {
    pub group: CaseGroup,
    pub text: String,
    pub expectation: Expectation,
}

impl RobustnessCase {
    fn new(group: CaseGroup, text: impl Into<String>, expectation: Expectation) -> Self {
        Self {
            group,
            text: text.into(),
            expectation,
        }
    }
}

const SHORT_INPUTS: &[(&str, &str)] = &[
    ("stock market", "business"),
    ("movie", "entertainment"),
    ("diabetes", "health"),
    ("revenue", "business"),
    ("concert", "entertainment"),
    ("surgery", "health"),
    ("profit", "business"),
    ("celebrity", "entertainment"),
    ("vaccine", "health"),
    ("investment", "business"),
    ("actor", "entertainment"),
    ("hospital", "health"),
];

const LONG_INPUTS: &[(&str, &str)] = &[
    (
        "The quarterly earnings report shows a significant increase in revenue. \
         The company's stock price surged after the announcement of the merger. \
         Analysts predict strong growth in the upcoming fiscal year with improved \
         profit margins and market expansion strategies.",
        "business",
    ),
    (
        "The new blockbuster movie premiered at the film festival to rave reviews. \
         The celebrity cast attended the red carpet event, and critics praised the \
         director's innovative storytelling. The soundtrack features collaborations \
         with Grammy-winning artists.",
        "entertainment",
    ),
    (
        "Recent medical research has shown promising results for the new cancer \
         treatment. Clinical trials indicate improved patient outcomes with fewer \
         side effects. The FDA is expected to review the drug application next month \
         following positive Phase 3 results.",
        "health",
    ),
];

const STOPWORD_INPUTS: &[(&str, Option<&str>)] = &[
    ("the company is doing very well in the market", Some("business")),
    ("the movie was really good and the actors were great", Some("entertainment")),
    ("the patient is doing well after the treatment", Some("health")),
    ("it is a very nice thing that they are doing", None),
];

const MIXED_INPUTS: &[&str] = &[
    "Healthcare company stock rises after FDA approval",
    "Celebrity invests millions in tech startup",
    "Sports team owner announces new stadium financing",
    "Actor diagnosed with rare disease speaks out",
    "Pharmaceutical company reports record quarterly profits",
];

const EDGE_CASES: &[(&str, &str)] = &[
    ("", "Empty string"),
    ("!@#$%^&*()", "Special characters only"),
    ("123456789", "Numbers only"),
    ("a", "Single letter"),
    ("https://example.com", "URL only"),
    ("Bonjour le monde", "Non-English text"),
    ("   ", "Whitespace only"),
    ("\n\t\r", "Control characters"),
];

/// The standard suite, in display order.
pub fn default_suite() -> Vec<RobustnessCase> {
    let mut cases = Vec::new();
    for (text, category) in SHORT_INPUTS {
        cases.push(RobustnessCase::new(
            CaseGroup::ShortInput,
            *text,
            Expectation::Category(*category),
        ));
    }
    for (text, category) in LONG_INPUTS {
        cases.push(RobustnessCase::new(
            CaseGroup::LongInput,
            *text,
            Expectation::Category(*category),
        ));
    }
    for (text, category) in STOPWORD_INPUTS {
        let expectation = match category {
            Some(category) => Expectation::Category(*category),
            None => Expectation::Unknown,
        };
        cases.push(RobustnessCase::new(CaseGroup::StopwordHeavy, *text, expectation));
    }
    for text in MIXED_INPUTS {
        cases.push(RobustnessCase::new(CaseGroup::MixedTopic, *text, Expectation::Mixed));
    }
    for (text, description) in EDGE_CASES {
        cases.push(RobustnessCase::new(
            CaseGroup::EdgeCase,
            *text,
            Expectation::Handled {
                description: *description,
            },
        ));
    }
    // 1000+ characters
    cases.push(RobustnessCase::new(
        CaseGroup::EdgeCase,
        "x ".repeat(500),
        Expectation::Handled {
            description: "Very long input",
        },
    ));
    cases
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub case: RobustnessCase,
    pub category: Option<String>,
    pub confidence: Option<f64>,
    pub error: Option<String>,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobustnessReport {
    pub outcomes: Vec<CaseOutcome>,
    pub total_scored: usize,
    pub correct: usize,
    pub accuracy_pct: f64,
    pub edge_cases_handled: usize,
    pub edge_cases_total: usize,
}

impl RobustnessReport {
    pub fn by_group(&self, group: CaseGroup) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(move |o| o.case.group == group)
    }
}

/// Texts to send, in suite order, capped at [`BATCH_LIMIT`].
pub fn batch_texts(cases: &[RobustnessCase]) -> Vec<String> {
    cases
        .iter()
        .take(BATCH_LIMIT)
        .map(|c| c.text.clone())
        .collect()
}

/// Score a batch response against the cases it was built from.
///
/// Rows are matched by position; a missing row counts as an error.
pub fn score(cases: &[RobustnessCase], response: &BatchClassifyResponse) -> RobustnessReport {
    let mut outcomes = Vec::with_capacity(cases.len());
    let mut total_scored = 0;
    let mut correct = 0;
    let mut edge_cases_handled = 0;
    let mut edge_cases_total = 0;

    for (index, case) in cases.iter().enumerate() {
        let (category, confidence, error) = match response.results.get(index).map(|r| &r.naive_bayes) {
            Some(BatchOutcome::Classified {
                category,
                confidence,
            }) => (Some(category.clone()), Some(*confidence), None),
            Some(BatchOutcome::Failed { error }) => (None, None, Some(error.clone())),
            None => (None, None, Some("no result returned".to_string())),
        };

        let passed = match &case.expectation {
            Expectation::Category(expected) => {
                let hit = category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(expected));
                if case.group.is_scored() {
                    total_scored += 1;
                    if hit {
                        correct += 1;
                    }
                }
                hit
            }
            Expectation::Unknown | Expectation::Mixed => true,
            Expectation::Handled { .. } => {
                edge_cases_total += 1;
                let handled = error.is_none();
                if handled {
                    edge_cases_handled += 1;
                }
                handled
            }
        };

        outcomes.push(CaseOutcome {
            case: case.clone(),
            category,
            confidence,
            error,
            passed,
        });
    }

    let accuracy_pct = if total_scored == 0 {
        0.0
    } else {
        ((correct as f64 / total_scored as f64) * 10_000.0).round() / 100.0
    };

    RobustnessReport {
        outcomes,
        total_scored,
        correct,
        accuracy_pct,
        edge_cases_handled,
        edge_cases_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BatchItem;

    fn classified(input: &str, category: &str) -> BatchItem {
        BatchItem {
            input: input.to_string(),
            naive_bayes: BatchOutcome::Classified {
                category: category.to_string(),
                confidence: 0.8,
            },
        }
    }

    fn echo_expected(cases: &[RobustnessCase]) -> BatchClassifyResponse {
        let results: Vec<BatchItem> = cases
            .iter()
            .map(|c| match &c.expectation {
                Expectation::Category(cat) => classified(&c.text, cat),
                _ => classified(&c.text, "business"),
            })
            .collect();
        BatchClassifyResponse {
            total: results.len(),
            results,
        }
    }

    #[test]
    fn test_suite_fits_single_batch() {
        let suite = default_suite();
        assert!(suite.len() <= BATCH_LIMIT);
        assert_eq!(batch_texts(&suite).len(), suite.len());
        assert_eq!(suite.iter().filter(|c| c.group == CaseGroup::EdgeCase).count(), 9);
    }

    #[test]
    fn test_perfect_classifier_scores_100() {
        let suite = default_suite();
        let report = score(&suite, &echo_expected(&suite));
        // 12 short + 3 long + 3 stopword with concrete expectations
        assert_eq!(report.total_scored, 18);
        assert_eq!(report.correct, 18);
        assert_eq!(report.accuracy_pct, 100.0);
        assert_eq!(report.edge_cases_handled, 9);
        assert!(report.outcomes.iter().all(|o| o.passed));
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let cases = vec![RobustnessCase::new(
            CaseGroup::ShortInput,
            "movie",
            Expectation::Category("entertainment"),
        )];
        let response = BatchClassifyResponse {
            total: 1,
            results: vec![classified("movie", "Entertainment")],
        };
        assert!(score(&cases, &response).outcomes[0].passed);
    }

    #[test]
    fn test_accuracy_rounded_to_two_decimals() {
        let cases: Vec<RobustnessCase> = ["a", "b", "c"]
            .iter()
            .map(|t| RobustnessCase::new(CaseGroup::ShortInput, *t, Expectation::Category("health")))
            .collect();
        let response = BatchClassifyResponse {
            total: 3,
            results: vec![
                classified("a", "health"),
                classified("b", "business"),
                classified("c", "business"),
            ],
        };
        let report = score(&cases, &response);
        assert_eq!(report.correct, 1);
        assert_eq!(report.accuracy_pct, 33.33);
    }

    #[test]
    fn test_missing_rows_count_as_errors() {
        let suite = default_suite();
        let response = BatchClassifyResponse {
            total: 0,
            results: Vec::new(),
        };
        let report = score(&suite, &response);
        assert_eq!(report.correct, 0);
        assert_eq!(report.edge_cases_handled, 0);
        assert_eq!(report.accuracy_pct, 0.0);
        let edge = report.by_group(CaseGroup::EdgeCase).next().unwrap();
        assert_eq!(edge.error.as_deref(), Some("no result returned"));
    }

    #[test]
    fn test_mixed_and_unknown_always_pass() {
        let cases = vec![
            RobustnessCase::new(CaseGroup::MixedTopic, "x", Expectation::Mixed),
            RobustnessCase::new(CaseGroup::StopwordHeavy, "y", Expectation::Unknown),
        ];
        let response = BatchClassifyResponse {
            total: 2,
            results: vec![classified("x", "health"), classified("y", "business")],
        };
        let report = score(&cases, &response);
        assert!(report.outcomes.iter().all(|o| o.passed));
        assert_eq!(report.total_scored, 0);
    }
}
