//! Frame scheduler - bounds pose inference to one run per `skip_factor` frames
//!
//! Frames in between reuse the cached result, so the skeleton seen by the
//! evaluator is at most `skip_factor - 1` frames old. A failed inference
//! replaces the cache with an explicit absent skeleton; stale landmarks are
//! never carried past a frame where the body left view.

use repsense_core::Skeleton;

use crate::{Frame, PoseSource};

/// Default inference interval
pub const DEFAULT_SKIP_FACTOR: u64 = 3;

/// What the scheduler did with a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Inference ran and the cache was replaced
    Inferred,
    /// Cached result reused
    Reused,
}

#[derive(Debug)]
pub struct FrameScheduler {
    skip_factor: u64,
    inference_width: u32,
    inference_height: u32,
    /// Frames seen so far
    counter: u64,
    /// `None` until the first inference
    cache: Option<Skeleton>,
}

impl FrameScheduler {
    /// A zero `skip_factor` is treated as 1 (infer every frame).
    pub fn new(skip_factor: u64, inference_width: u32, inference_height: u32) -> Self {
        FrameScheduler {
            skip_factor: skip_factor.max(1),
            inference_width,
            inference_height,
            counter: 0,
            cache: None,
        }
    }

    pub fn skip_factor(&self) -> u64 {
        self.skip_factor
    }

    /// Count `frame` and run inference if it falls on the schedule
    pub fn advance<S>(&mut self, frame: &Frame, source: &mut S) -> Dispatch
    where
        S: PoseSource + ?Sized,
    {
        self.counter += 1;
        if self.counter % self.skip_factor != 0 {
            return Dispatch::Reused;
        }

        let scaled = frame.downscale(self.inference_width, self.inference_height);
        let result = source.infer(&scaled).unwrap_or_else(Skeleton::absent);
        tracing::debug!(
            frame = self.counter,
            present = result.present,
            landmarks = result.landmark_count(),
            "pose inference"
        );
        self.cache = Some(result);
        Dispatch::Inferred
    }

    /// Last inference result, absent marker included
    pub fn cached(&self) -> Option<&Skeleton> {
        self.cache.as_ref()
    }

    /// Cached skeleton if a body is currently in view
    pub fn visible(&self) -> Option<&Skeleton> {
        self.cache.as_ref().filter(|s| s.present)
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        FrameScheduler::new(DEFAULT_SKIP_FACTOR, 640, 360)
    }
}
