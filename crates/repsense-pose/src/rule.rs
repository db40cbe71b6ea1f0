//! Rule table - form gates and repetition hysteresis per exercise

use repsense_core::{ExerciseKind, Feedback, Stage};

/// One-sided threshold on a measured value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Crossed when value > limit
    Above(f32),
    /// Crossed when value < limit
    Below(f32),
}

impl Threshold {
    #[inline]
    pub fn crossed(self, value: f32) -> bool {
        match self {
            Threshold::Above(limit) => value > limit,
            Threshold::Below(limit) => value < limit,
        }
    }
}

/// Form gate: while the threshold is crossed the frame is a form fault and the
/// repetition logic does not run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormGate {
    pub fault_when: Threshold,
    pub fault: Feedback,
}

/// Two-threshold repetition hysteresis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepRule {
    /// Crossing this arms the state machine
    pub baseline: Threshold,
    /// Crossing this while armed confirms a repetition
    pub confirm: Threshold,
    /// Stage entered on arming
    pub armed: Stage,
    /// Stage entered on confirmation
    pub peak: Stage,
}

/// Result of feeding one value to a `RepRule`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub stage: Stage,
    /// Baseline was crossed on this frame
    pub armed: bool,
    /// A repetition was confirmed on this frame
    pub rep: bool,
}

impl Step {
    pub fn idle(stage: Stage) -> Self {
        Step {
            stage,
            armed: false,
            rep: false,
        }
    }
}

impl RepRule {
    /// Advance the stage with one measurement
    pub fn step(&self, stage: Stage, value: f32) -> Step {
        let armed = self.baseline.crossed(value);
        let stage = if armed { self.armed } else { stage };

        if self.confirm.crossed(value) && stage == self.armed {
            return Step {
                stage: self.peak,
                armed,
                rep: true,
            };
        }

        Step {
            stage,
            armed,
            rep: false,
        }
    }
}

/// Which feedback a frame that passes the form gate produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackPolicy {
    /// Fixed label on every passing frame
    OnPass(Feedback),
    /// `CORRECT` on a confirming frame, `miss` on every other frame
    OnConfirm { miss: Feedback },
    /// `CORRECT` on an arming frame, label unchanged otherwise
    OnArm,
}

/// Complete rule set for one exercise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseRule {
    pub gate: Option<FormGate>,
    pub reps: Option<RepRule>,
    pub policy: FeedbackPolicy,
}

const fn gate(fault_when: Threshold, fault: Feedback) -> Option<FormGate> {
    Some(FormGate { fault_when, fault })
}

const fn reps(baseline: Threshold, armed: Stage, confirm: Threshold, peak: Stage) -> Option<RepRule> {
    Some(RepRule {
        baseline,
        confirm,
        armed,
        peak,
    })
}

use FeedbackPolicy::*;
use Threshold::*;

pub const BICEP_CURL: ExerciseRule = ExerciseRule {
    gate: gate(Above(45.0), Feedback::KeepElbowClose),
    reps: reps(Above(160.0), Stage::Down, Below(30.0), Stage::Up),
    policy: OnPass(Feedback::Correct),
};

pub const SQUAT: ExerciseRule = ExerciseRule {
    gate: gate(Below(150.0), Feedback::KeepBackStraight),
    reps: reps(Above(160.0), Stage::Up, Below(90.0), Stage::Down),
    policy: OnPass(Feedback::Correct),
};

pub const PUSHUP: ExerciseRule = ExerciseRule {
    gate: gate(Below(160.0), Feedback::KeepBodyStraight),
    reps: reps(Above(160.0), Stage::Up, Below(90.0), Stage::Down),
    policy: OnPass(Feedback::Correct),
};

pub const TRICEP_EXT: ExerciseRule = ExerciseRule {
    gate: gate(Above(50.0), Feedback::RaiseElbowsHigher),
    reps: reps(Above(160.0), Stage::Up, Below(90.0), Stage::Down),
    policy: OnPass(Feedback::Correct),
};

pub const SHOULDER_PRESS: ExerciseRule = ExerciseRule {
    gate: gate(Below(90.0), Feedback::TooLow),
    reps: reps(Below(100.0), Stage::Down, Above(160.0), Stage::Up),
    policy: OnPass(Feedback::Correct),
};

pub const LUNGE: ExerciseRule = ExerciseRule {
    gate: None,
    reps: reps(Above(160.0), Stage::Up, Below(100.0), Stage::Down),
    policy: OnConfirm {
        miss: Feedback::LowerDeeper,
    },
};

pub const DEADLIFT: ExerciseRule = ExerciseRule {
    gate: None,
    reps: reps(Above(160.0), Stage::Up, Below(100.0), Stage::Down),
    policy: OnConfirm {
        miss: Feedback::HingeAtHip,
    },
};

pub const LEG_RAISE: ExerciseRule = ExerciseRule {
    gate: None,
    reps: reps(Above(160.0), Stage::Down, Below(100.0), Stage::Up),
    policy: OnConfirm {
        miss: Feedback::ControlTheLift,
    },
};

/// Motion value is wrist height relative to the shoulder (image y grows down)
pub const LATERAL_RAISE: ExerciseRule = ExerciseRule {
    gate: gate(Below(160.0), Feedback::StraightenArm),
    reps: reps(Below(-0.15), Stage::Up, Above(-0.05), Stage::Down),
    policy: OnArm,
};

pub const PLANK: ExerciseRule = ExerciseRule {
    gate: gate(Below(160.0), Feedback::KeepBodyStraightPlank),
    reps: None,
    policy: OnPass(Feedback::HoldSteady),
};

/// Rule set for an exercise
pub fn rule_for(kind: ExerciseKind) -> &'static ExerciseRule {
    match kind {
        ExerciseKind::BicepCurl => &BICEP_CURL,
        ExerciseKind::Squat => &SQUAT,
        ExerciseKind::Pushup => &PUSHUP,
        ExerciseKind::TricepExt => &TRICEP_EXT,
        ExerciseKind::ShoulderPress => &SHOULDER_PRESS,
        ExerciseKind::Lunge => &LUNGE,
        ExerciseKind::Deadlift => &DEADLIFT,
        ExerciseKind::LegRaise => &LEG_RAISE,
        ExerciseKind::LateralRaise => &LATERAL_RAISE,
        ExerciseKind::Plank => &PLANK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_strict() {
        assert!(Threshold::Above(160.0).crossed(160.5));
        assert!(!Threshold::Above(160.0).crossed(160.0));
        assert!(Threshold::Below(30.0).crossed(29.9));
        assert!(!Threshold::Below(30.0).crossed(30.0));
    }

    #[test]
    fn test_rep_requires_arming() {
        let rule = BICEP_CURL.reps.unwrap();

        // Curling without ever extending does not count
        let step = rule.step(Stage::None, 20.0);
        assert_eq!(step, Step::idle(Stage::None));

        let step = rule.step(Stage::None, 170.0);
        assert!(step.armed);
        assert_eq!(step.stage, Stage::Down);

        let step = rule.step(step.stage, 20.0);
        assert!(step.rep);
        assert_eq!(step.stage, Stage::Up);

        // Staying curled does not count again
        let step = rule.step(step.stage, 15.0);
        assert!(!step.rep);
        assert_eq!(step.stage, Stage::Up);
    }

    #[test]
    fn test_mid_range_keeps_stage() {
        let rule = SQUAT.reps.unwrap();

        let step = rule.step(Stage::Up, 120.0);
        assert_eq!(step, Step::idle(Stage::Up));
    }

    #[test]
    fn test_every_timed_exercise_has_no_rep_rule() {
        for kind in ExerciseKind::ALL {
            assert_eq!(rule_for(kind).reps.is_none(), kind.is_time_based());
        }
    }
}
