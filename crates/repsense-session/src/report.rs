//! Aggregate reports over the session history

use chrono::NaiveDate;
use repsense_core::ExerciseKind;
use serde::Serialize;

use crate::{round2, SessionSummary};

/// Aggregate view of the history log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub report_date: NaiveDate,
    pub total_sessions: usize,
    /// Reps across rep-counted exercises; timed holds are excluded
    pub total_reps: u64,
    pub total_calories: f64,
    pub most_frequent_exercise: Option<ExerciseKind>,
    /// Most recent first
    pub detailed_history: Vec<SessionSummary>,
}

impl HistoryReport {
    /// Build a report from history ordered most recent first
    pub fn build(history: Vec<SessionSummary>, report_date: NaiveDate) -> Self {
        let total_reps = history
            .iter()
            .filter(|s| !s.exercise.is_time_based())
            .map(|s| u64::from(s.reps))
            .sum();
        let total_calories = round2(history.iter().map(|s| s.calories).sum());

        HistoryReport {
            report_date,
            total_sessions: history.len(),
            total_reps,
            total_calories,
            most_frequent_exercise: most_frequent(&history),
            detailed_history: history,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_sessions == 0
    }
}

/// Exercise with the most sessions; ties go to the one seen first
pub fn most_frequent(history: &[SessionSummary]) -> Option<ExerciseKind> {
    let mut counts: Vec<(ExerciseKind, usize)> = Vec::new();
    for summary in history {
        match counts.iter_mut().find(|(kind, _)| *kind == summary.exercise) {
            Some((_, count)) => *count += 1,
            None => counts.push((summary.exercise, 1)),
        }
    }

    let mut best: Option<(ExerciseKind, usize)> = None;
    for (kind, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((kind, count));
        }
    }
    best.map(|(kind, _)| kind)
}
