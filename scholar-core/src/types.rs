//! Wire types exchanged with the search and classification service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// SEARCH
// ============================================================================

/// Publication author as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub profile_url: Option<String>,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: i64,
    pub title: String,
    pub link: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

impl Publication {
    /// Comma separated author names, or "Unknown author".
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            return "Unknown author".to_string();
        }
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Response body of `GET /api/search/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Publication>,
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    pub query: String,
    pub search_time_ms: f64,
}

/// Response body of `GET /api/index-stats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: u64,
    pub total_terms: u64,
    pub unique_terms: u64,
    pub avg_document_length: f64,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Progress of a single crawl run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrawlState {
    Pending,
    Running,
    #[default]
    Completed,
    Failed,
}

/// One crawl run as recorded by the crawler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub crawl_time: DateTime<Utc>,
    #[serde(default)]
    pub publications_count: u64,
    #[serde(default)]
    pub pages_crawled: u64,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub status: CrawlState,
    #[serde(default)]
    pub error_message: String,
}

/// Response body of `GET /api/crawler-status/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlerStatus {
    pub is_running: bool,
    pub total_crawls: u64,
    pub total_publications: u64,
    #[serde(default)]
    pub schedule_info: Option<String>,
    #[serde(default)]
    pub last_crawl: Option<CrawlStats>,
}

impl CrawlerStatus {
    /// Short form for the header, e.g. `Crawl: 2024-05-12`.
    pub fn summary(&self) -> String {
        if self.is_running {
            return "Crawl: running".to_string();
        }
        match &self.last_crawl {
            Some(last) if last.status == CrawlState::Failed => {
                format!("Crawl: failed {}", last.crawl_time.format("%Y-%m-%d"))
            }
            Some(last) => format!("Crawl: {}", last.crawl_time.format("%Y-%m-%d")),
            None => "Crawl: never".to_string(),
        }
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classifier selectable on the classify endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    #[default]
    NaiveBayes,
    LogisticRegression,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::NaiveBayes => "naive_bayes",
            ModelType::LogisticRegression => "logistic_regression",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelType::NaiveBayes => "Naive Bayes",
            ModelType::LogisticRegression => "Logistic Regression",
        }
    }

    pub fn toggle(&self) -> ModelType {
        match self {
            ModelType::NaiveBayes => ModelType::LogisticRegression,
            ModelType::LogisticRegression => ModelType::NaiveBayes,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body of `POST /api/classify/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
    pub model_type: ModelType,
}

/// Response body of `POST /api/classify/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub category: String,
    pub confidence: f64,
    #[serde(default)]
    pub probabilities: HashMap<String, f64>,
    #[serde(default)]
    pub model_used: Option<ModelType>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ClassificationResponse {
    /// Probabilities ordered from most to least likely.
    pub fn ranked_probabilities(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Request body of `POST /api/batch-classify/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchClassifyRequest {
    pub texts: Vec<String>,
    pub model_type: ModelType,
}

/// Per-text outcome inside a batch response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Classified { category: String, confidence: f64 },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub input: String,
    pub naive_bayes: BatchOutcome,
}

/// Response body of `POST /api/batch-classify/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchClassifyResponse {
    pub total: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub is_trained: bool,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body of `GET /api/model-info/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub training_documents_count: u64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub models: HashMap<String, ModelStatus>,
}

impl ModelInfo {
    pub fn is_trained(&self, model: ModelType) -> bool {
        self.models
            .get(model.as_str())
            .map(|m| m.is_trained)
            .unwrap_or(false)
    }
}

/// Error body the service returns alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceError {
    /// Human readable summary, preferring `message` over `error`.
    pub fn summary(&self) -> Option<String> {
        match (&self.message, &self.error) {
            (Some(message), Some(error)) => Some(format!("{} ({})", message, error)),
            (Some(message), None) => Some(message.clone()),
            (None, Some(error)) => Some(error.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_decodes_original_shape() {
        let body = r#"{
            "results": [{
                "id": 7,
                "title": "Graph methods",
                "link": "https://example.org/p/7",
                "abstract": "On graphs.",
                "published_date": "2021-03-04",
                "authors": [{"id": 1, "name": "A. Author", "profile_url": null}],
                "relevance_score": 0.83
            }],
            "total": 95,
            "page": 1,
            "query": "graph",
            "search_time_ms": 12.5
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total, 95);
        assert_eq!(response.results[0].abstract_text.as_deref(), Some("On graphs."));
        assert_eq!(
            response.results[0].published_date,
            NaiveDate::from_ymd_opt(2021, 3, 4)
        );
        assert_eq!(response.results[0].author_line(), "A. Author");
    }

    #[test]
    fn test_crawler_status_decodes_with_and_without_last_crawl() {
        let body = r#"{
            "is_running": false,
            "total_crawls": 3,
            "total_publications": 412,
            "schedule_info": "Weekly on Sundays at 2:00 AM UTC",
            "target_url": "https://example.org/publications/",
            "last_crawl": {
                "id": 3,
                "crawl_time": "2024-05-12T02:00:00Z",
                "publications_count": 412,
                "pages_crawled": 21,
                "duration_seconds": 95.2,
                "target_url": "https://example.org/publications/",
                "status": "completed",
                "triggered_by": "scheduled",
                "error_message": ""
            }
        }"#;
        let status: CrawlerStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.total_publications, 412);
        let last = status.last_crawl.unwrap();
        assert_eq!(last.status, CrawlState::Completed);
        assert_eq!(last.pages_crawled, 21);

        let fresh: CrawlerStatus = serde_json::from_str(
            r#"{"is_running": true, "total_crawls": 0, "total_publications": 0}"#,
        )
        .unwrap();
        assert!(fresh.is_running);
        assert!(fresh.last_crawl.is_none());
        assert_eq!(fresh.summary(), "Crawl: running");
    }

    #[test]
    fn test_crawler_status_summary() {
        let mut status: CrawlerStatus = serde_json::from_str(
            r#"{"is_running": false, "total_crawls": 0, "total_publications": 0}"#,
        )
        .unwrap();
        assert_eq!(status.summary(), "Crawl: never");

        status.last_crawl = Some(CrawlStats {
            crawl_time: "2024-05-12T02:00:00Z".parse().unwrap(),
            publications_count: 0,
            pages_crawled: 1,
            duration_seconds: 4.0,
            status: CrawlState::Failed,
            error_message: "timeout".to_string(),
        });
        assert_eq!(status.summary(), "Crawl: failed 2024-05-12");
    }

    #[test]
    fn test_batch_outcome_untagged() {
        let body = r#"{"total": 2, "results": [
            {"input": "movie", "naive_bayes": {"category": "entertainment", "confidence": 0.9}},
            {"input": "", "naive_bayes": {"error": "empty"}}
        ]}"#;
        let response: BatchClassifyResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.results[0].naive_bayes,
            BatchOutcome::Classified { .. }
        ));
        assert!(matches!(
            response.results[1].naive_bayes,
            BatchOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_ranked_probabilities_descending() {
        let response = ClassificationResponse {
            category: "health".to_string(),
            confidence: 0.7,
            probabilities: HashMap::from([
                ("business".to_string(), 0.1),
                ("health".to_string(), 0.7),
                ("entertainment".to_string(), 0.2),
            ]),
            model_used: Some(ModelType::NaiveBayes),
            explanation: None,
            message: None,
        };
        let ranked = response.ranked_probabilities();
        assert_eq!(ranked[0].0, "health");
        assert_eq!(ranked[2].0, "business");
    }

    #[test]
    fn test_model_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&ModelType::LogisticRegression).unwrap(),
            "\"logistic_regression\""
        );
        assert_eq!(ModelType::NaiveBayes.toggle(), ModelType::LogisticRegression);
    }

    #[test]
    fn test_service_error_summary() {
        let err = ServiceError {
            error: Some("boom".to_string()),
            message: Some("Search failed.".to_string()),
        };
        assert_eq!(err.summary().as_deref(), Some("Search failed. (boom)"));
    }
}
