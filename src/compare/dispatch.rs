use std::sync::mpsc::Sender;

use super::*;
use crate::model::RefCatalog;

/// Backend the dashboard reads from.
pub trait ComparisonSource: Send + Sync {
    fn fetch_refs(&self) -> Result<RefCatalog, FetchError>;
    fn fetch_comparison(&self, key: &FetchKey) -> Result<ComparisonResult, FetchError>;
}

pub trait FetchDispatcher {
    /// Starts `request` without waiting for it.
    fn dispatch(&mut self, request: FetchRequest);
}

#[derive(Debug)]
pub enum FetchOutcome {
    Comparison {
        generation: u64,
        result: Result<ComparisonResult, FetchError>,
    },
    Catalog {
        generation: u64,
        result: Result<RefCatalog, FetchError>,
    },
}

/// Runs each request on its own worker thread and reports back over a
/// channel drained by the event loop.
pub struct ThreadedDispatcher {
    source: Arc<dyn ComparisonSource>,
    tx: Sender<FetchOutcome>,
}

impl ThreadedDispatcher {
    pub fn new(source: Arc<dyn ComparisonSource>, tx: Sender<FetchOutcome>) -> Self {
        Self { source, tx }
    }

    /// `generation` comes back with the outcome so the caller can drop a
    /// load that a newer one has superseded.
    pub fn load_catalog(&self, generation: u64) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = source.fetch_refs();
            // The receiver is gone once the app has quit.
            let _ = tx.send(FetchOutcome::Catalog { generation, result });
        });
    }
}

impl FetchDispatcher for ThreadedDispatcher {
    fn dispatch(&mut self, request: FetchRequest) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = source.fetch_comparison(&request.key);
            let _ = tx.send(FetchOutcome::Comparison {
                generation: request.generation,
                result,
            });
        });
    }
}

/// Keeps requests for the caller to complete by hand, in any order.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pub requests: Vec<FetchRequest>,
}

impl FetchDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, request: FetchRequest) {
        self.requests.push(request);
    }
}
