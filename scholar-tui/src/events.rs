//! Event types for the TUI event loop and the terminal input subscription.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use scholar_core::{
    BatchClassifyResponse, ClassificationResponse, CrawlerStatus, IndexStats, ModelInfo,
    SearchResponse, SessionError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    SearchCompleted {
        epoch: u64,
        outcome: Result<SearchResponse, SessionError>,
    },
    ClassifyCompleted {
        epoch: u64,
        outcome: Result<ClassificationResponse, String>,
    },
    RobustnessCompleted {
        epoch: u64,
        outcome: Result<BatchClassifyResponse, String>,
    },
    IndexStatsLoaded(IndexStats),
    ModelInfoLoaded(ModelInfo),
    CrawlerStatusLoaded(CrawlerStatus),
    ApiError(String),
}

const POLL_INTERVAL: Duration = Duration::from_millis(200);
const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Terminal key/resize listener bound to a scope.
///
/// The reader thread runs until the subscription is dropped.
pub struct InputSubscription {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputSubscription {
    pub fn subscribe(sender: mpsc::Sender<TuiEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            while !flag.load(Ordering::Acquire) {
                let Ok(true) = event::poll(POLL_INTERVAL) else {
                    continue;
                };
                let Ok(evt) = event::read() else {
                    continue;
                };
                let event = match evt {
                    // Windows terminals also report releases.
                    CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                        TuiEvent::Input(key)
                    }
                    CrosstermEvent::Resize(width, height) => TuiEvent::Resize { width, height },
                    _ => continue,
                };
                if !forward(&sender, &flag, event) {
                    break;
                }
            }
            tracing::debug!("input subscription closed");
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

/// Queue `event` without ever blocking past a stop request. Returns false
/// once the reader should exit.
fn forward(sender: &mpsc::Sender<TuiEvent>, stop: &AtomicBool, mut event: TuiEvent) -> bool {
    loop {
        match sender.try_send(event) {
            Ok(()) => return true,
            Err(TrySendError::Closed(_)) => return false,
            Err(TrySendError::Full(rejected)) => {
                if stop.load(Ordering::Acquire) {
                    return false;
                }
                event = rejected;
                std::thread::sleep(RETRY_INTERVAL);
            }
        }
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
