//! REST client for the search and classification service.

use crate::config::TuiConfig;
use async_trait::async_trait;
use scholar_core::{
    BatchClassifyRequest, BatchClassifyResponse, ClassificationResponse, ClassifierBackend,
    ClassifyRequest, CrawlerStatus, IndexStats, ModelInfo, ModelType, PageSize, SearchBackend,
    SearchResponse, ServiceError,
};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        let base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiClientError::Config("api_base_url is empty".to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub async fn search(
        &self,
        query: &str,
        page: u32,
        size: PageSize,
    ) -> Result<SearchResponse, ApiClientError> {
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("size", size.get().to_string()),
        ];
        self.get_json("/api/search/", Some(&params)).await
    }

    pub async fn classify(
        &self,
        text: &str,
        model: ModelType,
    ) -> Result<ClassificationResponse, ApiClientError> {
        let body = ClassifyRequest {
            text: text.to_string(),
            model_type: model,
        };
        self.post_json("/api/classify/", &body).await
    }

    pub async fn batch_classify(
        &self,
        texts: &[String],
    ) -> Result<BatchClassifyResponse, ApiClientError> {
        let body = BatchClassifyRequest {
            texts: texts.to_vec(),
            model_type: ModelType::NaiveBayes,
        };
        self.post_json("/api/batch-classify/", &body).await
    }

    pub async fn index_stats(&self) -> Result<IndexStats, ApiClientError> {
        self.get_json::<IndexStats, ()>("/api/index-stats/", None)
            .await
    }

    pub async fn model_info(&self) -> Result<ModelInfo, ApiClientError> {
        self.get_json::<ModelInfo, ()>("/api/model-info/", None)
            .await
    }

    pub async fn crawler_status(&self) -> Result<CrawlerStatus, ApiClientError> {
        self.get_json::<CrawlerStatus, ()>("/api/crawler-status/", None)
            .await
    }

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }
        tracing::debug!(path, "GET");
        let response = request.send().await?;
        parse_response(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(path, "POST");
        let response = self.client.post(url).json(body).send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        let text = response.text().await?;
        Ok(serde_json::from_str::<T>(&text)?)
    } else {
        let text = response.text().await?;
        Err(ApiClientError::InvalidResponse(describe_failure(
            status.as_u16(),
            &text,
        )))
    }
}

/// Error text for a non-2xx response, using the service's `{error, message}`
/// body when present.
pub fn describe_failure(status: u16, body: &str) -> String {
    if let Ok(service_error) = serde_json::from_str::<ServiceError>(body) {
        if let Some(summary) = service_error.summary() {
            return format!("HTTP {}: {}", status, summary);
        }
    }
    format!("HTTP {}: {}", status, body)
}

#[async_trait]
impl SearchBackend for RestClient {
    type Error = ApiClientError;

    async fn search(
        &self,
        query: &str,
        page: u32,
        size: PageSize,
    ) -> Result<SearchResponse, Self::Error> {
        RestClient::search(self, query, page, size).await
    }
}

#[async_trait]
impl ClassifierBackend for RestClient {
    type Error = ApiClientError;

    async fn classify(
        &self,
        text: &str,
        model: ModelType,
    ) -> Result<ClassificationResponse, Self::Error> {
        RestClient::classify(self, text, model).await
    }

    async fn batch_classify(&self, texts: &[String]) -> Result<BatchClassifyResponse, Self::Error> {
        RestClient::batch_classify(self, texts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_failure_uses_service_body() {
        let body = r#"{"error": "Query parameter is required", "example": "/api/search/?query=x"}"#;
        assert_eq!(
            describe_failure(400, body),
            "HTTP 400: Query parameter is required"
        );
    }

    #[test]
    fn test_describe_failure_falls_back_to_raw_body() {
        assert_eq!(describe_failure(502, "bad gateway"), "HTTP 502: bad gateway");
    }
}
