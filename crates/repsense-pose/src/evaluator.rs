//! Exercise evaluator - one measurement function per exercise

use repsense_core::{angle, ExerciseKind, Feedback, Joint, RepsenseResult, Skeleton, Stage};

use crate::{rule_for, ExerciseRule, FeedbackPolicy, Step};

/// Outcome of evaluating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Stage after this frame
    pub stage: Stage,
    /// A repetition was confirmed on this frame
    pub rep: bool,
    /// New feedback label; `None` keeps the current one
    pub feedback: Option<Feedback>,
}

impl Evaluation {
    fn hold(stage: Stage, feedback: Feedback) -> Self {
        Evaluation {
            stage,
            rep: false,
            feedback: Some(feedback),
        }
    }

    /// Repetition increment for this frame (0 or 1)
    #[inline]
    pub fn rep_delta(&self) -> u32 {
        u32::from(self.rep)
    }
}

/// Values read off a skeleton for one exercise
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurement {
    /// Value checked by the form gate
    pub form: Option<f32>,
    /// Value driving the repetition hysteresis
    pub motion: Option<f32>,
}

/// Evaluate one frame for the active exercise.
///
/// Never fails. An absent skeleton yields `EnsureFullBodyVisible`; a skeleton
/// missing a landmark the exercise needs yields `PlaceBodyInView`. In both
/// cases the stage is returned unchanged and no repetition is counted.
pub fn evaluate(kind: ExerciseKind, skeleton: Option<&Skeleton>, stage: Stage) -> Evaluation {
    let Some(skeleton) = skeleton.filter(|s| s.present) else {
        return Evaluation::hold(stage, Feedback::EnsureFullBodyVisible);
    };

    match measure(kind, skeleton) {
        Ok(measurement) => rule_for(kind).apply(measurement, stage),
        Err(err) => {
            tracing::trace!(exercise = %kind, error = %err, "partial skeleton");
            Evaluation::hold(stage, Feedback::PlaceBodyInView)
        }
    }
}

/// Read the joint angles an exercise depends on
pub fn measure(kind: ExerciseKind, skeleton: &Skeleton) -> RepsenseResult<Measurement> {
    match kind {
        ExerciseKind::BicepCurl => measure_bicep_curl(skeleton),
        ExerciseKind::Squat => measure_squat(skeleton),
        ExerciseKind::Pushup => measure_pushup(skeleton),
        ExerciseKind::TricepExt => measure_tricep_ext(skeleton),
        ExerciseKind::ShoulderPress => measure_shoulder_press(skeleton),
        ExerciseKind::Lunge => measure_lunge(skeleton),
        ExerciseKind::Deadlift | ExerciseKind::LegRaise => measure_hip_hinge(skeleton),
        ExerciseKind::LateralRaise => measure_lateral_raise(skeleton),
        ExerciseKind::Plank => measure_plank(skeleton),
    }
}

impl ExerciseRule {
    /// Apply the gate, hysteresis and feedback policy to one measurement
    pub fn apply(&self, measurement: Measurement, stage: Stage) -> Evaluation {
        if let (Some(gate), Some(value)) = (self.gate, measurement.form) {
            if gate.fault_when.crossed(value) {
                return Evaluation::hold(stage, gate.fault);
            }
        }

        let step = match (self.reps, measurement.motion) {
            (Some(rule), Some(value)) => rule.step(stage, value),
            _ => Step::idle(stage),
        };

        let feedback = match self.policy {
            FeedbackPolicy::OnPass(label) => Some(label),
            FeedbackPolicy::OnConfirm { miss } => Some(if step.rep { Feedback::Correct } else { miss }),
            FeedbackPolicy::OnArm => step.armed.then_some(Feedback::Correct),
        };

        Evaluation {
            stage: step.stage,
            rep: step.rep,
            feedback,
        }
    }
}

// Shoulder-elbow-wrist
fn elbow_angle(s: &Skeleton) -> RepsenseResult<f32> {
    Ok(angle(
        s.point(Joint::LeftShoulder)?,
        s.point(Joint::LeftElbow)?,
        s.point(Joint::LeftWrist)?,
    ))
}

// Hip-shoulder-elbow: how far the upper arm swings away from the torso
fn upper_arm_angle(s: &Skeleton) -> RepsenseResult<f32> {
    Ok(angle(
        s.point(Joint::LeftHip)?,
        s.point(Joint::LeftShoulder)?,
        s.point(Joint::LeftElbow)?,
    ))
}

// Shoulder-hip-knee
fn hip_angle(s: &Skeleton) -> RepsenseResult<f32> {
    Ok(angle(
        s.point(Joint::LeftShoulder)?,
        s.point(Joint::LeftHip)?,
        s.point(Joint::LeftKnee)?,
    ))
}

// Hip-knee-ankle
fn knee_angle(s: &Skeleton) -> RepsenseResult<f32> {
    Ok(angle(
        s.point(Joint::LeftHip)?,
        s.point(Joint::LeftKnee)?,
        s.point(Joint::LeftAnkle)?,
    ))
}

// Shoulder-hip-ankle: straight body line
fn body_line_angle(s: &Skeleton) -> RepsenseResult<f32> {
    Ok(angle(
        s.point(Joint::LeftShoulder)?,
        s.point(Joint::LeftHip)?,
        s.point(Joint::LeftAnkle)?,
    ))
}

fn measure_bicep_curl(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: Some(upper_arm_angle(s)?),
        motion: Some(elbow_angle(s)?),
    })
}

fn measure_squat(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: Some(hip_angle(s)?),
        motion: Some(knee_angle(s)?),
    })
}

fn measure_pushup(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: Some(body_line_angle(s)?),
        motion: Some(elbow_angle(s)?),
    })
}

fn measure_tricep_ext(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: Some(upper_arm_angle(s)?),
        motion: Some(elbow_angle(s)?),
    })
}

fn measure_shoulder_press(s: &Skeleton) -> RepsenseResult<Measurement> {
    let elbow = elbow_angle(s)?;
    Ok(Measurement {
        form: Some(elbow),
        motion: Some(elbow),
    })
}

fn measure_lunge(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: None,
        motion: Some(knee_angle(s)?),
    })
}

fn measure_hip_hinge(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: None,
        motion: Some(hip_angle(s)?),
    })
}

fn measure_lateral_raise(s: &Skeleton) -> RepsenseResult<Measurement> {
    let shoulder = s.point(Joint::LeftShoulder)?;
    let wrist = s.point(Joint::LeftWrist)?;
    Ok(Measurement {
        form: Some(elbow_angle(s)?),
        motion: Some(wrist.y - shoulder.y),
    })
}

fn measure_plank(s: &Skeleton) -> RepsenseResult<Measurement> {
    Ok(Measurement {
        form: Some(body_line_angle(s)?),
        motion: None,
    })
}
