//! Exercise catalog and repetition stage
//!
//! The catalog is closed: ten exercises, fixed at compile time. Nine are
//! counted in repetitions; the plank is timed and its "reps" are held seconds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RepsenseError;

/// Exercise kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    BicepCurl,
    Squat,
    Pushup,
    TricepExt,
    ShoulderPress,
    Lunge,
    Deadlift,
    LegRaise,
    LateralRaise,
    Plank,
}

impl ExerciseKind {
    /// All exercises in catalog order
    pub const ALL: [ExerciseKind; 10] = [
        ExerciseKind::BicepCurl,
        ExerciseKind::Squat,
        ExerciseKind::Pushup,
        ExerciseKind::TricepExt,
        ExerciseKind::ShoulderPress,
        ExerciseKind::Lunge,
        ExerciseKind::Deadlift,
        ExerciseKind::LegRaise,
        ExerciseKind::LateralRaise,
        ExerciseKind::Plank,
    ];

    /// Stable identifier used at the control boundary and in history records
    pub fn id(self) -> &'static str {
        match self {
            ExerciseKind::BicepCurl => "bicep_curl",
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::TricepExt => "tricep_ext",
            ExerciseKind::ShoulderPress => "shoulder_press",
            ExerciseKind::Lunge => "lunge",
            ExerciseKind::Deadlift => "deadlift",
            ExerciseKind::LegRaise => "leg_raise",
            ExerciseKind::LateralRaise => "lateral_raise",
            ExerciseKind::Plank => "plank",
        }
    }

    /// Human readable name
    pub fn display_name(self) -> &'static str {
        match self {
            ExerciseKind::BicepCurl => "Bicep Curl",
            ExerciseKind::Squat => "Squat",
            ExerciseKind::Pushup => "Push Up",
            ExerciseKind::TricepExt => "Tricep Ext.",
            ExerciseKind::ShoulderPress => "Shoulder Press",
            ExerciseKind::Lunge => "Forward Lunge",
            ExerciseKind::Deadlift => "Deadlift",
            ExerciseKind::LegRaise => "Leg Raise (Abs)",
            ExerciseKind::LateralRaise => "Lateral Raise",
            ExerciseKind::Plank => "Plank (Time)",
        }
    }

    /// Calories credited per confirmed repetition (0.0 for timed exercises)
    pub fn calories_per_rep(self) -> f64 {
        match self {
            ExerciseKind::BicepCurl => 0.5,
            ExerciseKind::Squat => 1.2,
            ExerciseKind::Pushup => 1.0,
            ExerciseKind::TricepExt => 0.6,
            ExerciseKind::ShoulderPress => 0.8,
            ExerciseKind::Lunge => 1.0,
            ExerciseKind::Deadlift => 1.5,
            ExerciseKind::LegRaise => 0.7,
            ExerciseKind::LateralRaise => 0.4,
            ExerciseKind::Plank => 0.0,
        }
    }

    /// Is this exercise measured in held time rather than repetitions?
    pub fn is_time_based(self) -> bool {
        matches!(self, ExerciseKind::Plank)
    }
}

impl FromStr for ExerciseKind {
    type Err = RepsenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| RepsenseError::UnknownExercise(s.to_string()))
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which extreme of the movement was last confirmed
///
/// The only memory carried between frames for repetition detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    None,
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_round_trip() {
        for kind in ExerciseKind::ALL {
            assert_eq!(kind.id().parse::<ExerciseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_exercise_rejected() {
        let err = "burpee".parse::<ExerciseKind>().unwrap_err();
        assert_eq!(err, RepsenseError::UnknownExercise("burpee".to_string()));
    }

    #[test]
    fn test_only_plank_is_timed() {
        let timed: Vec<_> = ExerciseKind::ALL
            .into_iter()
            .filter(|k| k.is_time_based())
            .collect();
        assert_eq!(timed, vec![ExerciseKind::Plank]);
        assert_eq!(ExerciseKind::Plank.calories_per_rep(), 0.0);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&ExerciseKind::ShoulderPress).unwrap();
        assert_eq!(json, "\"shoulder_press\"");
        let stage = serde_json::to_string(&Stage::Down).unwrap();
        assert_eq!(stage, "\"down\"");
    }
}
