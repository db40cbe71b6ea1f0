//! Pose inference boundary

use repsense_core::Skeleton;

use crate::Frame;

/// External pose-landmark extractor
///
/// `None` means no body was detected. Absence is an expected result; callers
/// never retry.
pub trait PoseSource: Send {
    fn infer(&mut self, frame: &Frame) -> Option<Skeleton>;
}

impl<F> PoseSource for F
where
    F: FnMut(&Frame) -> Option<Skeleton> + Send,
{
    fn infer(&mut self, frame: &Frame) -> Option<Skeleton> {
        self(frame)
    }
}

