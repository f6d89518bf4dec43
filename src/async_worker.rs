use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::predict::{fetch_candidates, PredictionBackend, PredictionRequest};

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

pub struct PredictionResult {
    pub generation: u64,
    pub candidates: Vec<String>,
}

// ---------------------------------------------------------------------------
// PredictionWorker
// ---------------------------------------------------------------------------

/// Runs blocking prediction calls on a background thread so the host event
/// loop never waits on the network. Results come back through `try_recv`.
pub struct PredictionWorker {
    work_tx: mpsc::Sender<PredictionRequest>,
    result_rx: Mutex<mpsc::Receiver<PredictionResult>>,
    latest: Arc<AtomicU64>,
}

impl PredictionWorker {
    pub fn new(backend: Arc<dyn PredictionBackend>) -> io::Result<Self> {
        let latest = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<PredictionRequest>();
        let (result_tx, result_rx) = mpsc::channel::<PredictionResult>();
        {
            let latest = Arc::clone(&latest);
            thread::Builder::new()
                .name("nextword-predict".into())
                .spawn(move || prediction_worker(work_rx, result_tx, latest, backend))?;
        }

        Ok(Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            latest,
        })
    }

    /// Queue `request`; everything issued before it becomes stale.
    pub fn submit(&self, request: PredictionRequest) {
        self.latest.store(request.generation, Ordering::SeqCst);
        let _ = self.work_tx.send(request);
    }

    /// Record `generation` as the latest issued. Work carrying any other
    /// number is skipped or dropped.
    pub fn set_latest(&self, generation: u64) {
        self.latest.store(generation, Ordering::SeqCst);
    }

    pub fn try_recv(&self) -> Option<PredictionResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    /// Blocking receive, for headless drivers that have nothing else to do.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PredictionResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn prediction_worker(
    rx: mpsc::Receiver<PredictionRequest>,
    tx: mpsc::Sender<PredictionResult>,
    latest: Arc<AtomicU64>,
    backend: Arc<dyn PredictionBackend>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple requests queued, skip to latest
        let mut request = work;
        while let Ok(newer) = rx.try_recv() {
            request = newer;
        }

        // Check staleness before touching the network
        if request.generation != latest.load(Ordering::SeqCst) {
            debug!(generation = request.generation, "skipping stale request");
            continue;
        }

        let candidates = fetch_candidates(backend.as_ref(), &request);

        // Check staleness after the call
        if request.generation != latest.load(Ordering::SeqCst) {
            debug!(generation = request.generation, "dropping stale result");
            continue;
        }

        if tx
            .send(PredictionResult {
                generation: request.generation,
                candidates,
            })
            .is_err()
        {
            break;
        }
    }
}
