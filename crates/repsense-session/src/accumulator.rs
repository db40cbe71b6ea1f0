//! Session accumulator - reps, elapsed time and calories for one session
//!
//! Calories are never accumulated incrementally. They are recomputed from
//! (exercise, reps, elapsed) so the total cannot drift.

use std::time::Duration;

use repsense_core::{ExerciseKind, Timestamp};

/// Seconds a timed hold must last before it earns calories
pub const HOLD_CALORIE_INTERVAL_SECS: u64 = 10;

/// Calories credited per completed hold interval
pub const HOLD_CALORIES_PER_INTERVAL: f64 = 0.1;

/// Calories for a session, derived purely from its measurements
pub fn calories_for(kind: ExerciseKind, reps: u32, elapsed_secs: u64) -> f64 {
    if kind.is_time_based() {
        (elapsed_secs / HOLD_CALORIE_INTERVAL_SECS) as f64 * HOLD_CALORIES_PER_INTERVAL
    } else {
        f64::from(reps) * kind.calories_per_rep()
    }
}

/// Running totals for the active exercise
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAccumulator {
    kind: ExerciseKind,
    /// Confirmed reps, or held seconds for timed exercises
    reps: u32,
    started_at: Timestamp,
    calories: f64,
}

impl SessionAccumulator {
    pub fn new(kind: ExerciseKind, started_at: Timestamp) -> Self {
        SessionAccumulator {
            kind,
            reps: 0,
            started_at,
            calories: 0.0,
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    /// Credit confirmed repetitions. Timed exercises ignore this.
    pub fn on_rep_delta(&mut self, delta: u32) {
        if self.kind.is_time_based() {
            return;
        }
        self.reps = self.reps.saturating_add(delta);
    }

    /// Timed exercises: the counter is the whole seconds held so far
    pub fn record_hold(&mut self, now: Timestamp) {
        if !self.kind.is_time_based() {
            return;
        }
        let held = u32::try_from(self.elapsed_secs(now)).unwrap_or(u32::MAX);
        self.reps = self.reps.max(held);
    }

    /// Recompute calories from the current totals
    pub fn recompute_calories(&mut self, now: Timestamp) -> f64 {
        self.calories = calories_for(self.kind, self.reps, self.elapsed_secs(now));
        self.calories
    }

    /// Bring every derived value up to `now`
    pub fn refresh(&mut self, now: Timestamp) {
        self.record_hold(now);
        self.recompute_calories(now);
    }

    /// Wall time since the session started
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        now.saturating_since(self.started_at)
    }

    /// Whole seconds since the session started
    pub fn elapsed_secs(&self, now: Timestamp) -> u64 {
        self.elapsed(now).as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(secs: f64) -> Timestamp {
        Timestamp::from_secs_f64(secs)
    }

    #[test]
    fn test_rep_calories() {
        let mut acc = SessionAccumulator::new(ExerciseKind::Squat, at(0.0));

        acc.on_rep_delta(1);
        acc.on_rep_delta(1);
        acc.on_rep_delta(0);

        assert_eq!(acc.reps(), 2);
        assert!((acc.recompute_calories(at(30.0)) - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_plank_counts_seconds() {
        let mut acc = SessionAccumulator::new(ExerciseKind::Plank, at(5.0));

        acc.on_rep_delta(1);
        assert_eq!(acc.reps(), 0);

        acc.refresh(at(29.7));
        assert_eq!(acc.reps(), 24);
        assert!((acc.calories() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_plank_calories_only_whole_intervals() {
        assert_eq!(calories_for(ExerciseKind::Plank, 0, 9), 0.0);
        assert!((calories_for(ExerciseKind::Plank, 0, 10) - 0.1).abs() < 1e-9);
        assert!((calories_for(ExerciseKind::Plank, 0, 59) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_before_start_is_zero() {
        let acc = SessionAccumulator::new(ExerciseKind::Lunge, at(10.0));
        assert_eq!(acc.elapsed(at(3.0)), Duration::ZERO);
    }

    proptest! {
        #[test]
        fn prop_rep_calories_never_drift(deltas in proptest::collection::vec(0u32..=1, 0..500)) {
            for kind in ExerciseKind::ALL.into_iter().filter(|k| !k.is_time_based()) {
                let mut acc = SessionAccumulator::new(kind, Timestamp::ZERO);
                for d in &deltas {
                    acc.on_rep_delta(*d);
                    acc.recompute_calories(Timestamp::from_millis(1000));
                }
                let expected = f64::from(acc.reps()) * kind.calories_per_rep();
                prop_assert_eq!(acc.calories(), expected);
            }
        }

        #[test]
        fn prop_plank_matches_timestamps(millis in proptest::collection::vec(0u64..5_000, 1..50)) {
            let mut acc = SessionAccumulator::new(ExerciseKind::Plank, Timestamp::ZERO);
            let mut now = 0u64;
            for step in millis {
                now += step;
                acc.refresh(Timestamp::from_millis(now));
                let secs = now / 1000;
                prop_assert_eq!(u64::from(acc.reps()), secs);
                prop_assert_eq!(acc.calories(), (secs / 10) as f64 * 0.1);
            }
        }
    }
}
