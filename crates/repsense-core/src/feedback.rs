//! Form feedback vocabulary
//!
//! Feedback is a closed set of labels. The overlay shows the label verbatim and
//! colours it by `is_positive`.

use std::fmt;

use serde::{Serialize, Serializer};

/// Feedback label shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Feedback {
    // Lifecycle
    #[default]
    SelectExercise,
    StartWorkout,
    HoldPosition,

    // Success
    Correct,
    HoldSteady,

    // Perception gaps
    EnsureFullBodyVisible,
    PlaceBodyInView,

    // Form faults
    KeepElbowClose,
    KeepBackStraight,
    KeepBodyStraight,
    RaiseElbowsHigher,
    TooLow,
    LowerDeeper,
    HingeAtHip,
    ControlTheLift,
    StraightenArm,
    KeepBodyStraightPlank,
}

impl Feedback {
    pub fn label(self) -> &'static str {
        match self {
            Feedback::SelectExercise => "SELECT AN EXERCISE",
            Feedback::StartWorkout => "START YOUR WORKOUT",
            Feedback::HoldPosition => "HOLD POSITION",
            Feedback::Correct => "CORRECT",
            Feedback::HoldSteady => "HOLD STEADY",
            Feedback::EnsureFullBodyVisible => "POSITION: Ensure full body is visible",
            Feedback::PlaceBodyInView => "Place entire body in view",
            Feedback::KeepElbowClose => "FIX: Keep Elbow Close",
            Feedback::KeepBackStraight => "FIX: Keep Back Straight",
            Feedback::KeepBodyStraight => "FIX: Keep Body Straight",
            Feedback::RaiseElbowsHigher => "FIX: Raise Elbows Higher",
            Feedback::TooLow => "FIX: Too Low",
            Feedback::LowerDeeper => "FIX: Lower deeper (Knee to 90)",
            Feedback::HingeAtHip => "FIX: Hinge at the hip",
            Feedback::ControlTheLift => "FIX: Control the lift",
            Feedback::StraightenArm => "FIX: Straighten Arm",
            Feedback::KeepBodyStraightPlank => "FIX: Keep Body Straight (Plank)",
        }
    }

    /// Good-form signal (rendered green)
    pub fn is_positive(self) -> bool {
        matches!(self, Feedback::Correct | Feedback::HoldSteady)
    }

    /// Caused by missing perception rather than by the user's form
    pub fn is_visibility_fault(self) -> bool {
        matches!(
            self,
            Feedback::EnsureFullBodyVisible | Feedback::PlaceBodyInView
        )
    }

    /// Corrective label for a form fault
    pub fn is_form_fault(self) -> bool {
        self.label().starts_with("FIX:")
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_classes() {
        assert!(Feedback::Correct.is_positive());
        assert!(Feedback::HoldSteady.is_positive());
        assert!(!Feedback::TooLow.is_positive());

        assert!(Feedback::StraightenArm.is_form_fault());
        assert!(!Feedback::PlaceBodyInView.is_form_fault());
        assert!(Feedback::PlaceBodyInView.is_visibility_fault());
    }

    #[test]
    fn test_feedback_serializes_as_label() {
        let json = serde_json::to_string(&Feedback::KeepElbowClose).unwrap();
        assert_eq!(json, "\"FIX: Keep Elbow Close\"");
    }
}
