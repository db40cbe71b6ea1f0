//! Summary sinks - where finished sessions go
//!
//! Persistence is fire-and-forget from the frame loop's point of view:
//! failures are logged and counted, never returned to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use repsense_session::{HistoryLog, HistoryResult, SessionSummary};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receiver of finalized session summaries
pub trait SummarySink: Send + Sync {
    fn submit(&self, summary: SessionSummary);
}

/// Persistence counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub written: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
struct WriterCounters {
    written: AtomicU64,
    failed: AtomicU64,
}

impl WriterCounters {
    fn record(&self, summary: &SessionSummary, result: HistoryResult<()>) {
        match result {
            Ok(()) => {
                self.written.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    exercise = %summary.exercise,
                    reps = summary.reps,
                    error = %err,
                    "failed to persist session summary"
                );
            }
        }
    }

    fn snapshot(&self) -> WriterStats {
        WriterStats {
            written: self.written.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Appends inline on the calling thread
pub struct DirectSink {
    log: Arc<dyn HistoryLog>,
    counters: WriterCounters,
}

impl DirectSink {
    pub fn new(log: Arc<dyn HistoryLog>) -> Self {
        DirectSink {
            log,
            counters: WriterCounters::default(),
        }
    }

    pub fn stats(&self) -> WriterStats {
        self.counters.snapshot()
    }
}

impl SummarySink for DirectSink {
    fn submit(&self, summary: SessionSummary) {
        let result = self.log.append(&summary);
        self.counters.record(&summary, result);
    }
}

/// Defers appends to a background task so the frame loop never waits on I/O
///
/// The task exits once every `HistoryWriter` has been dropped and the queue
/// is drained.
pub struct HistoryWriter {
    tx: mpsc::UnboundedSender<SessionSummary>,
    counters: Arc<WriterCounters>,
}

/// Background half of a [`HistoryWriter`]
pub struct WriterTask {
    handle: JoinHandle<()>,
    counters: Arc<WriterCounters>,
}

impl HistoryWriter {
    /// Start the writer task. Must be called from within a tokio runtime.
    pub fn spawn(log: Arc<dyn HistoryLog>) -> (HistoryWriter, WriterTask) {
        let (tx, mut rx) = mpsc::unbounded_channel::<SessionSummary>();
        let counters = Arc::new(WriterCounters::default());

        let task_counters = Arc::clone(&counters);
        let handle = tokio::spawn(async move {
            while let Some(summary) = rx.recv().await {
                let log = Arc::clone(&log);
                let pending = summary.clone();
                let result = match tokio::task::spawn_blocking(move || log.append(&pending)).await {
                    Ok(result) => result,
                    Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err).into()),
                };
                task_counters.record(&summary, result);
            }
            tracing::debug!("history writer stopped");
        });

        (
            HistoryWriter {
                tx,
                counters: Arc::clone(&counters),
            },
            WriterTask { handle, counters },
        )
    }

    pub fn stats(&self) -> WriterStats {
        self.counters.snapshot()
    }
}

impl SummarySink for HistoryWriter {
    fn submit(&self, summary: SessionSummary) {
        if let Err(mpsc::error::SendError(summary)) = self.tx.send(summary) {
            self.counters.failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(exercise = %summary.exercise, "history writer stopped, summary dropped");
        }
    }
}

impl WriterTask {
    pub fn stats(&self) -> WriterStats {
        self.counters.snapshot()
    }

    /// Wait for the queue to drain. Returns the final counters.
    pub async fn join(self) -> WriterStats {
        if let Err(err) = self.handle.await {
            tracing::warn!(error = %err, "history writer task failed");
        }
        self.counters.snapshot()
    }
}
