//! Runs backend requests off the event loop.
//!
//! Each helper spawns one task and reports back through the event channel.
//! The epoch travels with the completion so the receiving state can drop
//! superseded results.

use crate::api_client::RestClient;
use crate::events::TuiEvent;
use crate::state::Effect;
use scholar_core::{ClassifierBackend, ModelType, SearchBackend, SearchRequest, SessionError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub fn spawn_search<B>(
    backend: Arc<B>,
    request: SearchRequest,
    sender: mpsc::Sender<TuiEvent>,
) -> JoinHandle<()>
where
    B: SearchBackend + 'static,
{
    tokio::spawn(async move {
        let SearchRequest {
            epoch, query, page, size, ..
        } = request;
        let outcome = backend
            .search(&query, page, size)
            .await
            .map_err(|err| SessionError::transport(err.to_string()));
        let _ = sender
            .send(TuiEvent::SearchCompleted { epoch, outcome })
            .await;
    })
}

pub fn spawn_classify<B>(
    backend: Arc<B>,
    epoch: u64,
    text: String,
    model: ModelType,
    sender: mpsc::Sender<TuiEvent>,
) -> JoinHandle<()>
where
    B: ClassifierBackend + 'static,
{
    tokio::spawn(async move {
        let outcome = backend
            .classify(&text, model)
            .await
            .map_err(|err| err.to_string());
        let _ = sender
            .send(TuiEvent::ClassifyCompleted { epoch, outcome })
            .await;
    })
}

pub fn spawn_robustness<B>(
    backend: Arc<B>,
    epoch: u64,
    texts: Vec<String>,
    sender: mpsc::Sender<TuiEvent>,
) -> JoinHandle<()>
where
    B: ClassifierBackend + 'static,
{
    tokio::spawn(async move {
        let outcome = backend
            .batch_classify(&texts)
            .await
            .map_err(|err| err.to_string());
        let _ = sender
            .send(TuiEvent::RobustnessCompleted { epoch, outcome })
            .await;
    })
}

/// Fetch index statistics, model status and crawler status for the header.
pub fn spawn_service_info(client: RestClient, sender: mpsc::Sender<TuiEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match client.index_stats().await {
            Ok(stats) => {
                let _ = sender.send(TuiEvent::IndexStatsLoaded(stats)).await;
            }
            Err(err) => {
                let _ = sender
                    .send(TuiEvent::ApiError(format!("Index stats unavailable: {}", err)))
                    .await;
            }
        }
        match client.model_info().await {
            Ok(info) => {
                let _ = sender.send(TuiEvent::ModelInfoLoaded(info)).await;
            }
            Err(err) => {
                let _ = sender
                    .send(TuiEvent::ApiError(format!("Model info unavailable: {}", err)))
                    .await;
            }
        }
        match client.crawler_status().await {
            Ok(status) => {
                let _ = sender.send(TuiEvent::CrawlerStatusLoaded(status)).await;
            }
            Err(err) => {
                let _ = sender
                    .send(TuiEvent::ApiError(format!("Crawler status unavailable: {}", err)))
                    .await;
            }
        }
    })
}

/// Start the work an [`Effect`] describes.
pub fn execute<B>(backend: &Arc<B>, effect: Effect, sender: mpsc::Sender<TuiEvent>) -> JoinHandle<()>
where
    B: SearchBackend + ClassifierBackend + 'static,
{
    match effect {
        Effect::Search(request) => {
            tracing::debug!(
                epoch = request.epoch,
                page = request.page,
                size = request.size.get(),
                "dispatching search"
            );
            spawn_search(Arc::clone(backend), request, sender)
        }
        Effect::Classify { epoch, text, model } => {
            spawn_classify(Arc::clone(backend), epoch, text, model, sender)
        }
        Effect::Robustness { epoch, texts } => {
            spawn_robustness(Arc::clone(backend), epoch, texts, sender)
        }
    }
}
