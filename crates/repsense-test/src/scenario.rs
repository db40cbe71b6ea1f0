//! End-to-end workout scenarios
//!
//! `WorkoutRig` wires a manual clock, an in-memory history and a direct sink
//! into a session handle, then drives frame pipelines against it at a fixed
//! frame interval.

use std::sync::Arc;
use std::time::Duration;

use repsense_runtime::{
    DirectSink, Frame, FrameOutcome, FramePipeline, PipelineConfig, PoseSource, SessionHandle,
};
use repsense_session::MemoryHistoryLog;
use repsense_time::ManualClock;

/// 30 fps
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(33_333);

pub struct WorkoutRig {
    pub clock: ManualClock,
    pub log: Arc<MemoryHistoryLog>,
    pub sink: Arc<DirectSink>,
    pub session: SessionHandle,
    pub frame_interval: Duration,
    frame_width: u32,
    frame_height: u32,
}

impl WorkoutRig {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let log = Arc::new(MemoryHistoryLog::new());
        let sink = Arc::new(DirectSink::new(log.clone()));
        let session = SessionHandle::new(Arc::new(clock.clone()), sink.clone(), log.clone());

        WorkoutRig {
            clock,
            log,
            sink,
            session,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            frame_width: 1280,
            frame_height: 720,
        }
    }

    /// Camera resolution of generated frames
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    pub fn pipeline<S: PoseSource>(&self, config: &PipelineConfig, source: S) -> FramePipeline<S> {
        FramePipeline::new(config, source, self.session.clone())
    }

    /// Push `count` frames, advancing the clock one interval before each
    pub fn feed<S: PoseSource>(
        &self,
        pipeline: &mut FramePipeline<S>,
        count: usize,
    ) -> Vec<FrameOutcome> {
        let frame = Frame::blank(self.frame_width, self.frame_height);
        (0..count)
            .map(|_| {
                self.clock.advance(self.frame_interval);
                pipeline.process_frame(&frame)
            })
            .collect()
    }

    /// Frames needed for `inferences` scheduled inference runs
    pub fn frames_for(config: &PipelineConfig, inferences: usize) -> usize {
        inferences * config.skip_factor as usize
    }
}

impl Default for WorkoutRig {
    fn default() -> Self {
        Self::new()
    }
}
