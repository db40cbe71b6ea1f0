//! Frame pipeline - the producer loop
//!
//! Frames are processed strictly one at a time: schedule, maybe infer,
//! evaluate, update totals. Nothing here waits on another frame or on
//! history I/O.

use std::time::{Duration, Instant};

use repsense_core::Skeleton;
use repsense_pose::Evaluation;

use crate::{Dispatch, Frame, FrameScheduler, PipelineConfig, PoseSource, SessionHandle};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineStats {
    pub frames: u64,
    pub inferences: u64,
    /// Inferences that found no body
    pub absent_inferences: u64,
    pub last_frame_duration: Duration,
}

/// Result of processing one frame
#[derive(Clone, Debug)]
pub struct FrameOutcome {
    /// 1-based frame number
    pub index: u64,
    pub dispatch: Dispatch,
    /// Skeleton the frame was evaluated against (for drawing)
    pub skeleton: Option<Skeleton>,
    /// `None` while no exercise is selected
    pub evaluation: Option<Evaluation>,
}

pub struct FramePipeline<S: PoseSource> {
    scheduler: FrameScheduler,
    source: S,
    session: SessionHandle,
    stats: PipelineStats,
}

impl<S: PoseSource> FramePipeline<S> {
    pub fn new(config: &PipelineConfig, source: S, session: SessionHandle) -> Self {
        FramePipeline {
            scheduler: FrameScheduler::new(
                config.skip_factor,
                config.inference_width,
                config.inference_height,
            ),
            source,
            session,
            stats: PipelineStats::default(),
        }
    }

    /// Process one camera frame
    pub fn process_frame(&mut self, frame: &Frame) -> FrameOutcome {
        let start = Instant::now();
        self.stats.frames += 1;

        let dispatch = self.scheduler.advance(frame, &mut self.source);
        if dispatch == Dispatch::Inferred {
            self.stats.inferences += 1;
            if self.scheduler.visible().is_none() {
                self.stats.absent_inferences += 1;
            }
        }

        let skeleton = self.scheduler.cached().copied();
        let evaluation = self.session.evaluate_frame(skeleton.as_ref());
        if let Some(evaluation) = &evaluation {
            tracing::trace!(
                frame = self.stats.frames,
                stage = ?evaluation.stage,
                rep = evaluation.rep,
                "frame evaluated"
            );
        }

        self.stats.last_frame_duration = start.elapsed();
        FrameOutcome {
            index: self.stats.frames,
            dispatch,
            skeleton,
            evaluation,
        }
    }

    /// Drain `frames` through the pipeline
    pub fn run<I>(&mut self, frames: I) -> PipelineStats
    where
        I: IntoIterator<Item = Frame>,
    {
        for frame in frames {
            self.process_frame(&frame);
        }
        tracing::debug!(
            frames = self.stats.frames,
            inferences = self.stats.inferences,
            absent = self.stats.absent_inferences,
            skip_factor = self.scheduler.skip_factor(),
            "frame stream ended"
        );
        self.stats.clone()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
