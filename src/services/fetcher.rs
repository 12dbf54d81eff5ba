//! Background detections fetch
//!
//! Runs the single `GET /detections` request on a worker thread so the UI
//! keeps drawing while it is in flight.

use crate::error::ApiError;
use crate::model::Detection;
use crate::services::DetectionsApi;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Messages sent from the worker thread
#[derive(Debug)]
pub enum FetchMessage {
    Loaded(Vec<Detection>),
    Failed(ApiError),
}

/// One-shot fetcher for the detections list
#[derive(Default)]
pub struct DetectionFetcher {
    /// Receiver for the in-flight request (if any)
    receiver: Option<Receiver<FetchMessage>>,
}

impl DetectionFetcher {
    pub fn new() -> Self {
        Self { receiver: None }
    }

    /// Start the request on a worker thread
    pub fn spawn(&mut self, api: Arc<dyn DetectionsApi>) {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let message = match api.detections() {
                Ok(detections) => FetchMessage::Loaded(detections),
                Err(e) => FetchMessage::Failed(e),
            };
            // Receiver gone means the screen was torn down; nothing to do
            let _ = tx.send(message);
        });

        self.receiver = Some(rx);
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Non-blocking check for the result
    ///
    /// Returns the list once when it arrives. Failures are logged and
    /// swallowed, leaving the caller's list untouched.
    pub fn poll(&mut self) -> Option<Vec<Detection>> {
        let receiver = self.receiver.as_ref()?;

        let result = match receiver.try_recv() {
            Ok(FetchMessage::Loaded(detections)) => {
                log::info!("loaded {} detections", detections.len());
                Some(detections)
            }
            Ok(FetchMessage::Failed(e)) => {
                log::warn!("detections fetch failed: {}", e);
                None
            }
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("detections fetch worker exited without a result");
                None
            }
        };

        self.receiver = None;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::FakeApi;
    use std::time::{Duration, Instant};

    fn poll_until_settled(fetcher: &mut DetectionFetcher) -> Option<Vec<Detection>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(detections) = fetcher.poll() {
                return Some(detections);
            }
            if !fetcher.is_pending() {
                return None;
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_poll_without_spawn_is_none() {
        let mut fetcher = DetectionFetcher::new();
        assert!(!fetcher.is_pending());
        assert!(fetcher.poll().is_none());
    }

    #[test]
    fn test_loaded_list_is_delivered_once() {
        let api = Arc::new(FakeApi::with_detections(3));
        let mut fetcher = DetectionFetcher::new();
        fetcher.spawn(api.clone());

        let detections = poll_until_settled(&mut fetcher).expect("fetch should resolve");
        assert_eq!(detections.len(), 3);
        assert!(!fetcher.is_pending());
        assert!(fetcher.poll().is_none());
        assert_eq!(api.detections_calls(), 1);
    }

    #[test]
    fn test_failure_is_swallowed() {
        let api = Arc::new(FakeApi::failing());
        let mut fetcher = DetectionFetcher::new();
        fetcher.spawn(api);

        assert!(poll_until_settled(&mut fetcher).is_none());
        assert!(!fetcher.is_pending());
    }

    #[test]
    fn test_unresolved_fetch_stays_pending() {
        let api = Arc::new(FakeApi::hanging());
        let mut fetcher = DetectionFetcher::new();
        fetcher.spawn(api);

        thread::sleep(Duration::from_millis(20));
        assert!(fetcher.poll().is_none());
        assert!(fetcher.is_pending());
    }
}
