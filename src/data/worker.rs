//! Background worker for capture loading.
//!
//! Keeps the UI responsive while a capture is fetched and parsed. Each request
//! carries a generation tag; results whose tag no longer matches the current
//! generation were superseded (newer request, or teardown) and are discarded
//! in `poll` rather than committed to caller-visible state.

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread::{self, JoinHandle};

use crate::data::{Dataset, TextSource, load};
use crate::error::LoadError;

enum LoaderRequest {
    Load {
        generation: u64,
        source: Box<dyn TextSource>,
    },
    Shutdown,
}

struct LoadOutcome {
    generation: u64,
    result: Result<Dataset, LoadError>,
}

/// Background loader that fetches captures off the UI thread
pub struct BackgroundLoader {
    tx: Sender<LoaderRequest>,
    rx: Receiver<LoadOutcome>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl BackgroundLoader {
    /// Spawn the worker thread
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = channel::<LoaderRequest>();
        let (res_tx, res_rx) = channel::<LoadOutcome>();

        let handle = thread::spawn(move || {
            Self::worker_loop(req_rx, res_tx);
        });

        Self {
            tx: req_tx,
            rx: res_rx,
            handle: Some(handle),
            generation: 0,
        }
    }

    fn worker_loop(rx: Receiver<LoaderRequest>, tx: Sender<LoadOutcome>) {
        while let Ok(request) = rx.recv() {
            match request {
                LoaderRequest::Load { generation, source } => {
                    let result = load(source.as_ref());
                    if tx.send(LoadOutcome { generation, result }).is_err() {
                        break;
                    }
                }
                LoaderRequest::Shutdown => break,
            }
        }
    }

    /// Start a new load, superseding any request still in flight
    pub fn request(&mut self, source: Box<dyn TextSource>) {
        self.generation += 1;
        let _ = self.tx.send(LoaderRequest::Load {
            generation: self.generation,
            source,
        });
    }

    /// Forget whatever is in flight; its eventual result will be discarded
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Poll for a finished load (non-blocking). Stale results are dropped
    /// here, never surfaced to the caller.
    pub fn poll(&self) -> Option<Result<Dataset, LoadError>> {
        loop {
            match self.rx.try_recv() {
                Ok(outcome) if outcome.generation == self.generation => {
                    return Some(outcome.result);
                }
                Ok(_) => continue, // superseded
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

impl Drop for BackgroundLoader {
    fn drop(&mut self) {
        let _ = self.tx.send(LoaderRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for BackgroundLoader {
    fn default() -> Self {
        Self::spawn()
    }
}
