//! Shared session handle
//!
//! The lifecycle sits behind one mutex. Frame evaluation and control
//! operations each take it exactly once, so a reset or switch is never
//! observed half-applied by the next frame. Summaries are dispatched to the
//! sink after the lifecycle lock is released, under a second lock taken before
//! it, so the sink sees them in finalize order.

use std::sync::Arc;

use parking_lot::Mutex;
use repsense_core::{ExerciseKind, RepsenseResult, Skeleton};
use repsense_pose::Evaluation;
use repsense_session::{
    HistoryLog, HistoryReport, HistoryResult, LiveStats, SessionLifecycle, SessionSummary,
};
use repsense_time::Clock;

use crate::SummarySink;

#[derive(Clone)]
pub struct SessionHandle {
    lifecycle: Arc<Mutex<SessionLifecycle>>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn SummarySink>,
    history: Arc<dyn HistoryLog>,
    /// Held from finalize until the summary is submitted
    dispatch_order: Arc<Mutex<()>>,
}

impl SessionHandle {
    pub fn new(
        clock: Arc<dyn Clock>,
        sink: Arc<dyn SummarySink>,
        history: Arc<dyn HistoryLog>,
    ) -> Self {
        SessionHandle {
            lifecycle: Arc::new(Mutex::new(SessionLifecycle::new(Arc::clone(&clock)))),
            clock,
            sink,
            history,
            dispatch_order: Arc::new(Mutex::new(())),
        }
    }

    /// Start (or switch to) `kind`
    pub fn start(&self, kind: ExerciseKind) {
        self.finish_with(|lifecycle| lifecycle.start(kind));
    }

    /// Start by catalog identifier, e.g. `"bicep_curl"`
    pub fn start_by_id(&self, id: &str) -> RepsenseResult<ExerciseKind> {
        let kind = id.parse::<ExerciseKind>().map_err(|err| {
            tracing::debug!(id, "rejected exercise selection");
            err
        })?;
        self.start(kind);
        Ok(kind)
    }

    /// Finalize the current session and return to idle
    pub fn reset(&self) {
        self.finish_with(SessionLifecycle::reset);
    }

    /// Evaluate one frame's skeleton against the active exercise
    pub fn evaluate_frame(&self, skeleton: Option<&Skeleton>) -> Option<Evaluation> {
        self.lifecycle.lock().evaluate_frame(skeleton)
    }

    pub fn stats(&self) -> LiveStats {
        self.lifecycle.lock().stats()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.lock().is_active()
    }

    /// Aggregate report over the history log, dated today
    pub fn report(&self) -> HistoryResult<HistoryReport> {
        let history = self.history.read_all()?;
        let today = self.clock.wall_time().date_naive();
        Ok(HistoryReport::build(history, today))
    }

    /// Run a finalizing operation and submit its summary.
    ///
    /// Lock order is lifecycle then dispatch. Frame evaluation never takes
    /// the dispatch lock, so a slow sink only stalls other control calls.
    fn finish_with<F>(&self, op: F)
    where
        F: FnOnce(&mut SessionLifecycle) -> Option<SessionSummary>,
    {
        let mut lifecycle = self.lifecycle.lock();
        let finished = op(&mut *lifecycle);
        let _order = self.dispatch_order.lock();
        drop(lifecycle);

        if let Some(summary) = finished {
            self.sink.submit(summary);
        }
    }
}
