//! Pose simulation
//!
//! `PoseSynth` builds left-side skeletons whose joint angles are exactly the
//! requested values, so thresholds can be exercised without a camera.
//! `ScriptedPoseSource` replays a queue of inference results.

use std::collections::VecDeque;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use repsense_core::{point_at_angle, ExerciseKind, Joint, Point2D, Skeleton};
use repsense_runtime::{Frame, PoseSource};

/// Segment lengths in normalized image units
const ARM_SEGMENT: f32 = 0.15;
const LEG_SEGMENT: f32 = 0.2;

/// Joint angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles {
    /// Hip-shoulder-elbow
    pub upper_arm: f32,
    /// Shoulder-elbow-wrist
    pub elbow: f32,
    /// Shoulder-hip-knee
    pub hip: f32,
    /// Hip-knee-ankle
    pub knee: f32,
}

impl JointAngles {
    /// Standing upright, arms hanging
    pub const UPRIGHT: JointAngles = JointAngles {
        upper_arm: 10.0,
        elbow: 170.0,
        hip: 180.0,
        knee: 180.0,
    };

    pub fn with_elbow(self, elbow: f32) -> Self {
        JointAngles { elbow, ..self }
    }

    pub fn with_hip(self, hip: f32) -> Self {
        JointAngles { hip, ..self }
    }

    pub fn with_knee(self, knee: f32) -> Self {
        JointAngles { knee, ..self }
    }

    pub fn with_upper_arm(self, upper_arm: f32) -> Self {
        JointAngles { upper_arm, ..self }
    }
}

/// Which end of a repetition to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Position that arms the counter
    Rest,
    /// Position that confirms a repetition
    Peak,
}

/// Angles that put `kind` in `phase` with good form
pub fn angles_for(kind: ExerciseKind, phase: Phase) -> JointAngles {
    let rest = phase == Phase::Rest;
    let base = JointAngles::UPRIGHT;
    match kind {
        ExerciseKind::BicepCurl => base.with_elbow(if rest { 170.0 } else { 20.0 }),
        ExerciseKind::Squat => {
            if rest {
                base.with_hip(170.0).with_knee(170.0)
            } else {
                base.with_hip(160.0).with_knee(80.0)
            }
        }
        ExerciseKind::Pushup => base.with_elbow(if rest { 170.0 } else { 80.0 }),
        ExerciseKind::TricepExt => base
            .with_upper_arm(30.0)
            .with_elbow(if rest { 170.0 } else { 80.0 }),
        ExerciseKind::ShoulderPress => base.with_elbow(if rest { 95.0 } else { 170.0 }),
        ExerciseKind::Lunge => base.with_knee(if rest { 170.0 } else { 90.0 }),
        ExerciseKind::Deadlift | ExerciseKind::LegRaise => {
            base.with_hip(if rest { 170.0 } else { 90.0 })
        }
        // Straight arm; height handled by `PoseSynth::lateral`
        ExerciseKind::LateralRaise => base.with_elbow(180.0),
        ExerciseKind::Plank => base,
    }
}

/// Skeleton builder
pub struct PoseSynth {
    jitter: Option<(StdRng, Uniform<f32>)>,
}

impl PoseSynth {
    /// Exact poses
    pub fn new() -> Self {
        PoseSynth { jitter: None }
    }

    /// Poses with every coordinate offset by up to `amplitude`
    pub fn with_jitter(seed: u64, amplitude: f32) -> Self {
        let amplitude = amplitude.abs();
        PoseSynth {
            jitter: Some((
                StdRng::seed_from_u64(seed),
                Uniform::new_inclusive(-amplitude, amplitude),
            )),
        }
    }

    /// Full left side with the given angles
    pub fn pose(&mut self, angles: JointAngles) -> Skeleton {
        let shoulder = Point2D::new(0.5, 0.3);
        let hip = Point2D::new(0.5, 0.6);
        let elbow = point_at_angle(shoulder, hip, angles.upper_arm, ARM_SEGMENT);
        let wrist = point_at_angle(elbow, shoulder, angles.elbow, ARM_SEGMENT);
        let knee = point_at_angle(hip, shoulder, angles.hip, LEG_SEGMENT);
        let ankle = point_at_angle(knee, hip, angles.knee, LEG_SEGMENT);

        self.skeleton([
            (Joint::LeftShoulder, shoulder),
            (Joint::LeftElbow, elbow),
            (Joint::LeftWrist, wrist),
            (Joint::LeftHip, hip),
            (Joint::LeftKnee, knee),
            (Joint::LeftAnkle, ankle),
        ])
    }

    /// Straight arm held out sideways, wrist `rise` above the shoulder
    pub fn lateral(&mut self, rise: f32) -> Skeleton {
        let shoulder = Point2D::new(0.5, 0.4);
        self.skeleton([
            (Joint::LeftShoulder, shoulder),
            (Joint::LeftElbow, Point2D::new(0.65, 0.4 - rise / 2.0)),
            (Joint::LeftWrist, Point2D::new(0.8, 0.4 - rise)),
            (Joint::LeftHip, Point2D::new(0.5, 0.7)),
        ])
    }

    /// `kind` at one end of its movement
    pub fn exercise(&mut self, kind: ExerciseKind, phase: Phase) -> Skeleton {
        match (kind, phase) {
            (ExerciseKind::LateralRaise, Phase::Rest) => self.lateral(0.2),
            (ExerciseKind::LateralRaise, Phase::Peak) => self.lateral(0.0),
            _ => self.pose(angles_for(kind, phase)),
        }
    }

    /// `count` full repetitions: rest, peak, ..., ending at rest
    pub fn reps(&mut self, kind: ExerciseKind, count: usize) -> Vec<Skeleton> {
        let mut frames = Vec::with_capacity(count * 2 + 1);
        for _ in 0..count {
            frames.push(self.exercise(kind, Phase::Rest));
            frames.push(self.exercise(kind, Phase::Peak));
        }
        frames.push(self.exercise(kind, Phase::Rest));
        frames
    }

    fn skeleton<const N: usize>(&mut self, points: [(Joint, Point2D); N]) -> Skeleton {
        let Some((rng, spread)) = self.jitter.as_mut() else {
            return Skeleton::from_points(points);
        };
        Skeleton::from_points(points.map(|(joint, p)| {
            (
                joint,
                Point2D::new(p.x + spread.sample(rng), p.y + spread.sample(rng)),
            )
        }))
    }
}

impl Default for PoseSynth {
    fn default() -> Self {
        Self::new()
    }
}

/// Pose source replaying queued inference results
///
/// Once the script runs out, `fallback` is returned for every call.
#[derive(Debug, Default)]
pub struct ScriptedPoseSource {
    script: VecDeque<Option<Skeleton>>,
    fallback: Option<Skeleton>,
    calls: usize,
    frame_sizes: Vec<(u32, u32)>,
}

impl ScriptedPoseSource {
    pub fn new<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Option<Skeleton>>,
    {
        ScriptedPoseSource {
            script: results.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Every result present
    pub fn present<I>(skeletons: I) -> Self
    where
        I: IntoIterator<Item = Skeleton>,
    {
        Self::new(skeletons.into_iter().map(Some))
    }

    /// Result returned after the script is exhausted
    pub fn then_hold(mut self, fallback: Option<Skeleton>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, result: Option<Skeleton>) {
        self.script.push_back(result);
    }

    /// Inference calls so far
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Frame sizes seen by inference, in call order
    pub fn frame_sizes(&self) -> &[(u32, u32)] {
        &self.frame_sizes
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PoseSource for ScriptedPoseSource {
    fn infer(&mut self, frame: &Frame) -> Option<Skeleton> {
        self.calls += 1;
        self.frame_sizes.push((frame.width(), frame.height()));
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repsense_core::angle;
    use repsense_pose::measure;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_pose_angles_exact() {
        let mut synth = PoseSynth::new();
        let s = synth.pose(JointAngles {
            upper_arm: 25.0,
            elbow: 70.0,
            hip: 120.0,
            knee: 95.0,
        });

        let p = |j| s.point(j).unwrap();
        assert_close(
            angle(p(Joint::LeftHip), p(Joint::LeftShoulder), p(Joint::LeftElbow)),
            25.0,
        );
        assert_close(
            angle(p(Joint::LeftShoulder), p(Joint::LeftElbow), p(Joint::LeftWrist)),
            70.0,
        );
        assert_close(
            angle(p(Joint::LeftShoulder), p(Joint::LeftHip), p(Joint::LeftKnee)),
            120.0,
        );
        assert_close(
            angle(p(Joint::LeftHip), p(Joint::LeftKnee), p(Joint::LeftAnkle)),
            95.0,
        );
    }

    #[test]
    fn test_every_exercise_measurable() {
        let mut synth = PoseSynth::new();
        for kind in ExerciseKind::ALL {
            for phase in [Phase::Rest, Phase::Peak] {
                let skeleton = synth.exercise(kind, phase);
                assert!(measure(kind, &skeleton).is_ok(), "{kind} {phase:?}");
            }
        }
    }

    #[test]
    fn test_lateral_motion_value() {
        let mut synth = PoseSynth::new();
        let m = measure(ExerciseKind::LateralRaise, &synth.lateral(0.2)).unwrap();

        assert_close(m.motion.unwrap(), -0.2);
        assert_close(m.form.unwrap(), 180.0);
    }

    #[test]
    fn test_jitter_is_seeded() {
        let a = PoseSynth::with_jitter(7, 0.01).pose(JointAngles::UPRIGHT);
        let b = PoseSynth::with_jitter(7, 0.01).pose(JointAngles::UPRIGHT);
        let exact = PoseSynth::new().pose(JointAngles::UPRIGHT);

        assert_eq!(a, b);
        assert_ne!(a, exact);
        let drift = a
            .point(Joint::LeftWrist)
            .unwrap()
            .distance(&exact.point(Joint::LeftWrist).unwrap());
        assert!(drift <= 0.015);
    }

    #[test]
    fn test_scripted_source_replay() {
        let mut synth = PoseSynth::new();
        let body = synth.pose(JointAngles::UPRIGHT);
        let mut source = ScriptedPoseSource::new([Some(body), None]).then_hold(Some(body));
        let frame = Frame::blank(4, 4);

        assert_eq!(source.infer(&frame), Some(body));
        assert_eq!(source.infer(&frame), None);
        assert_eq!(source.infer(&frame), Some(body));
        assert_eq!(source.calls(), 3);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.frame_sizes(), &[(4u32, 4u32); 3]);
    }
}
