//! Session summaries and live statistics

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use repsense_core::{ExerciseKind, Feedback, Stage};
use serde::{Deserialize, Deserializer, Serialize};

/// Round to two decimals, the precision calories are reported at
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Immutable record of a finished session, appended to the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise: ExerciseKind,
    /// Confirmed reps, or held seconds for timed exercises
    pub reps: u32,
    pub calories: f64,
    /// Whole seconds
    pub duration: u64,
    /// Wall-clock time the session was finalized
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` read as UTC
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(stamped) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(stamped.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(serde::de::Error::custom)
}

/// Snapshot of the live session for the control surface and the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveStats {
    pub exercise: Option<ExerciseKind>,
    pub reps: u32,
    pub calories: f64,
    /// Whole seconds since the session started
    pub duration: u64,
    #[serde(rename = "form_feedback")]
    pub feedback: Feedback,
    pub stage: Stage,
}

impl LiveStats {
    /// Stats with no exercise selected
    pub fn idle(feedback: Feedback) -> Self {
        LiveStats {
            exercise: None,
            reps: 0,
            calories: 0.0,
            duration: 0,
            feedback,
            stage: Stage::None,
        }
    }

    /// Name shown in the overlay header
    pub fn display_name(&self) -> &'static str {
        self.exercise.map_or("None", ExerciseKind::display_name)
    }

    /// Elapsed time as `MM:SS`
    pub fn clock_label(&self) -> String {
        format!("{:02}:{:02}", self.duration / 60, self.duration % 60)
    }
}
