//! Collaborator traits for the remote search and classification service.

use crate::session::PageSize;
use crate::types::{BatchClassifyResponse, ClassificationResponse, ModelType, SearchResponse};
use async_trait::async_trait;
use std::error::Error as StdError;

/// Executes paged searches.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    async fn search(
        &self,
        query: &str,
        page: u32,
        size: PageSize,
    ) -> Result<SearchResponse, Self::Error>;
}

/// Classifies free text.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    async fn classify(
        &self,
        text: &str,
        model: ModelType,
    ) -> Result<ClassificationResponse, Self::Error>;

    /// Naive Bayes only; the service truncates to its own batch limit.
    async fn batch_classify(&self, texts: &[String]) -> Result<BatchClassifyResponse, Self::Error>;
}
