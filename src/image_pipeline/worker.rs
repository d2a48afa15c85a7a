//! Dedicated frame worker with keep-only-latest backpressure.
//!
//! Frames are offered through a one-slot mailbox. If the worker is still busy
//! when a newer frame arrives, the pending one is replaced and dropped, so
//! memory and latency stay bounded by a single frame. The worker processes
//! frames strictly one at a time and hands each output to the display channel
//! before it looks at the next frame.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::image_pipeline::{
    PipelineError, Result,
    frame::{FrameDecoder, RawFrame},
    highlight::HighlightPipeline,
    raster::Raster,
};

#[derive(Default)]
struct SlotState {
    pending: Option<RawFrame>,
    closed: bool,
}

struct LatestFrame {
    state: Mutex<SlotState>,
    notify: Notify,
    dropped: AtomicU64,
    submitters: AtomicUsize,
}

impl LatestFrame {
    fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::default()),
            notify: Notify::new(),
            dropped: AtomicU64::new(0),
            submitters: AtomicUsize::new(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // The slot only ever holds plain data, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Takes the pending frame, if any, along with the closed flag.
    fn take(&self) -> (Option<RawFrame>, bool) {
        let mut state = self.lock();
        (state.pending.take(), state.closed)
    }

    fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_one();
    }

    /// Closes the slot from the worker side, discarding a frame nobody will
    /// process.
    fn shut_down(&self) {
        let mut state = self.lock();
        state.closed = true;
        if state.pending.take().is_some() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Producer handle for a [`FrameWorker`]. Cheap to clone.
///
/// Dropping the last handle closes the worker, as does [`close`](Self::close).
pub struct FrameSubmitter {
    slot: Arc<LatestFrame>,
}

impl FrameSubmitter {
    /// Offers a frame to the worker.
    ///
    /// Returns `Ok(true)` when an older frame that had not been picked up yet
    /// was replaced (and dropped) by this one.
    pub fn submit(&self, frame: RawFrame) -> Result<bool> {
        let replaced = {
            let mut state = self.slot.lock();
            if state.closed {
                return Err(PipelineError::WorkerClosed);
            }
            state.pending.replace(frame).is_some()
        };
        if replaced {
            self.slot.dropped.fetch_add(1, Ordering::Relaxed);
            debug!("Pending frame replaced by a newer one");
        }
        self.slot.notify.notify_one();
        Ok(replaced)
    }

    /// Stops accepting frames. A frame already pending is still processed.
    pub fn close(&self) {
        self.slot.close();
    }

    pub fn is_closed(&self) -> bool {
        self.slot.is_closed()
    }
}

impl Clone for FrameSubmitter {
    fn clone(&self) -> Self {
        self.slot.submitters.fetch_add(1, Ordering::Relaxed);
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl Drop for FrameSubmitter {
    fn drop(&mut self) {
        if self.slot.submitters.fetch_sub(1, Ordering::AcqRel) == 1 {
            debug!("Last frame submitter dropped, closing worker");
            self.slot.close();
        }
    }
}

/// Counters reported when a worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Frames turned into an output raster
    pub processed: u64,
    /// Frames rejected by the pipeline (decode or dimension errors)
    pub failed: u64,
    /// Frames replaced in the mailbox before the worker reached them
    pub dropped: u64,
}

pub struct FrameWorker {
    handle: JoinHandle<WorkerStats>,
}

impl FrameWorker {
    /// Spawns the worker onto the current tokio runtime.
    ///
    /// Pipeline work runs on the blocking pool; outputs are sent on `output`
    /// in submission order. The worker stops once its submitters are closed
    /// (or all dropped) and the mailbox is empty, or when `output`'s receiver
    /// is dropped. A frame still pending at that point counts as dropped.
    pub fn spawn<D>(
        pipeline: HighlightPipeline<D>,
        output: mpsc::Sender<Raster>,
    ) -> (FrameSubmitter, FrameWorker)
    where
        D: FrameDecoder + Send + Sync + 'static,
    {
        let slot = Arc::new(LatestFrame::new());
        let submitter = FrameSubmitter {
            slot: Arc::clone(&slot),
        };
        let handle = tokio::spawn(run(Arc::new(pipeline), slot, output));
        (submitter, FrameWorker { handle })
    }

    /// Waits for the worker to finish.
    pub async fn join(self) -> Result<WorkerStats> {
        self.handle
            .await
            .map_err(|e| PipelineError::WorkerFailed(e.to_string()))
    }
}

async fn run<D>(
    pipeline: Arc<HighlightPipeline<D>>,
    slot: Arc<LatestFrame>,
    output: mpsc::Sender<Raster>,
) -> WorkerStats
where
    D: FrameDecoder + Send + Sync + 'static,
{
    let mut stats = WorkerStats::default();
    info!("Frame worker started");

    loop {
        let frame = match slot.take() {
            (Some(frame), _) => frame,
            (None, true) => break,
            (None, false) => {
                slot.notify.notified().await;
                continue;
            }
        };

        let sequence = stats.processed + stats.failed;
        let job = Arc::clone(&pipeline);
        match tokio::task::spawn_blocking(move || job.process(frame)).await {
            Ok(Ok(raster)) => {
                stats.processed += 1;
                if output.send(raster).await.is_err() {
                    info!("Display receiver dropped, stopping frame worker");
                    break;
                }
            }
            Ok(Err(e)) => {
                stats.failed += 1;
                warn!(frame = sequence, error = %e, "Frame skipped");
            }
            Err(e) => {
                stats.failed += 1;
                error!(frame = sequence, error = %e, "Frame processing aborted");
            }
        }
    }

    slot.shut_down();
    stats.dropped = slot.dropped.load(Ordering::Relaxed);
    info!(
        processed = stats.processed,
        failed = stats.failed,
        dropped = stats.dropped,
        "Frame worker stopped"
    );
    stats
}
