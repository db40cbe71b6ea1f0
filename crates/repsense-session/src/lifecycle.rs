//! Session lifecycle - Idle ⇄ Active(exercise)
//!
//! Exactly one session is live at a time. Starting an exercise while another
//! is active finalizes the old one first; the caller receives the resulting
//! summary (if the session was worth keeping) and is responsible for handing
//! it to the history log.

use std::sync::Arc;

use repsense_core::{ExerciseKind, Feedback, Skeleton, Stage};
use repsense_pose::{evaluate, Evaluation};
use repsense_time::Clock;

use crate::{round2, LiveStats, SessionAccumulator, SessionSummary};

/// Minimum hold for a timed session to be persisted
pub const MIN_PERSISTED_HOLD_SECS: u64 = 15;

/// Session currently being tracked
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub totals: SessionAccumulator,
    pub stage: Stage,
}

/// Lifecycle phase
#[derive(Debug, Clone, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active(ActiveSession),
}

/// Owner of the single live session
pub struct SessionLifecycle {
    clock: Arc<dyn Clock>,
    phase: SessionPhase,
    feedback: Feedback,
    /// Sessions started since creation
    started: u64,
}

impl SessionLifecycle {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        SessionLifecycle {
            clock,
            phase: SessionPhase::Idle,
            feedback: Feedback::SelectExercise,
            started: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Active(_))
    }

    pub fn exercise(&self) -> Option<ExerciseKind> {
        match &self.phase {
            SessionPhase::Active(session) => Some(session.totals.kind()),
            SessionPhase::Idle => None,
        }
    }

    pub fn stage(&self) -> Stage {
        match &self.phase {
            SessionPhase::Active(session) => session.stage,
            SessionPhase::Idle => Stage::None,
        }
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn sessions_started(&self) -> u64 {
        self.started
    }

    /// Start tracking `kind`, finalizing the current session first
    pub fn start(&mut self, kind: ExerciseKind) -> Option<SessionSummary> {
        let finished = self.finalize();

        let now = self.clock.now();
        self.phase = SessionPhase::Active(ActiveSession {
            totals: SessionAccumulator::new(kind, now),
            stage: Stage::None,
        });
        self.feedback = if kind.is_time_based() {
            Feedback::HoldPosition
        } else {
            Feedback::StartWorkout
        };
        self.started += 1;

        tracing::info!(exercise = %kind, "session started");
        finished
    }

    /// Finalize the current session and return to Idle
    pub fn reset(&mut self) -> Option<SessionSummary> {
        let finished = self.finalize();
        self.feedback = Feedback::SelectExercise;
        tracing::info!("session reset");
        finished
    }

    /// End the active session.
    ///
    /// Returns a summary only if the session is worth persisting: at least one
    /// rep, or for timed exercises a hold of `MIN_PERSISTED_HOLD_SECS`.
    /// Invalid sessions are dropped without error.
    pub fn finalize(&mut self) -> Option<SessionSummary> {
        let SessionPhase::Active(mut session) = std::mem::take(&mut self.phase) else {
            return None;
        };

        let now = self.clock.now();
        session.totals.refresh(now);

        let kind = session.totals.kind();
        let duration = session.totals.elapsed_secs(now);
        let valid = if kind.is_time_based() {
            duration >= MIN_PERSISTED_HOLD_SECS
        } else {
            session.totals.reps() > 0
        };

        if !valid {
            tracing::debug!(exercise = %kind, reps = session.totals.reps(), duration, "session discarded");
            return None;
        }

        let summary = SessionSummary {
            exercise: kind,
            reps: session.totals.reps(),
            calories: round2(session.totals.calories()),
            duration,
            timestamp: self.clock.wall_time(),
        };
        tracing::info!(
            exercise = %kind,
            reps = summary.reps,
            calories = summary.calories,
            duration,
            "session finalized"
        );
        Some(summary)
    }

    /// Evaluate one frame against the active exercise.
    ///
    /// Returns `None` while idle; nothing is evaluated and the feedback label
    /// is left alone.
    pub fn evaluate_frame(&mut self, skeleton: Option<&Skeleton>) -> Option<Evaluation> {
        let SessionPhase::Active(session) = &mut self.phase else {
            return None;
        };

        let now = self.clock.now();
        let kind = session.totals.kind();
        let evaluation = evaluate(kind, skeleton, session.stage);

        session.stage = evaluation.stage;
        if let Some(feedback) = evaluation.feedback {
            self.feedback = feedback;
        }
        if evaluation.rep {
            session.totals.on_rep_delta(evaluation.rep_delta());
            tracing::debug!(exercise = %kind, reps = session.totals.reps(), "rep confirmed");
        }
        session.totals.refresh(now);

        Some(evaluation)
    }

    /// Snapshot for the control surface
    pub fn stats(&self) -> LiveStats {
        let SessionPhase::Active(session) = &self.phase else {
            return LiveStats::idle(self.feedback);
        };

        let now = self.clock.now();
        let mut totals = session.totals.clone();
        totals.refresh(now);

        LiveStats {
            exercise: Some(totals.kind()),
            reps: totals.reps(),
            calories: round2(totals.calories()),
            duration: totals.elapsed_secs(now),
            feedback: self.feedback,
            stage: session.stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repsense_core::{point_at_angle, Joint, Point2D};
    use repsense_time::ManualClock;
    use std::time::Duration;

    fn lifecycle() -> (SessionLifecycle, ManualClock) {
        let clock = ManualClock::new();
        (SessionLifecycle::new(Arc::new(clock.clone())), clock)
    }

    fn curl(elbow: f32) -> Skeleton {
        let shoulder = Point2D::new(0.5, 0.3);
        let hip = Point2D::new(0.5, 0.6);
        let elbow_pt = point_at_angle(shoulder, hip, 10.0, 0.15);
        let wrist = point_at_angle(elbow_pt, shoulder, elbow, 0.15);
        Skeleton::from_points([
            (Joint::LeftShoulder, shoulder),
            (Joint::LeftElbow, elbow_pt),
            (Joint::LeftWrist, wrist),
            (Joint::LeftHip, hip),
        ])
    }

    #[test]
    fn test_idle_by_default() {
        let (mut session, _) = lifecycle();

        assert!(!session.is_active());
        assert_eq!(session.feedback(), Feedback::SelectExercise);
        assert!(session.evaluate_frame(Some(&curl(170.0))).is_none());
        assert!(session.finalize().is_none());
        assert_eq!(session.stats(), LiveStats::idle(Feedback::SelectExercise));
    }

    #[test]
    fn test_start_sets_initial_feedback() {
        let (mut session, _) = lifecycle();

        session.start(ExerciseKind::Squat);
        assert_eq!(session.feedback(), Feedback::StartWorkout);

        session.start(ExerciseKind::Plank);
        assert_eq!(session.feedback(), Feedback::HoldPosition);
        assert_eq!(session.sessions_started(), 2);
    }

    #[test]
    fn test_bicep_curl_session() {
        let (mut session, clock) = lifecycle();
        session.start(ExerciseKind::BicepCurl);

        for elbow in [170.0, 20.0, 170.0, 15.0] {
            clock.advance(Duration::from_millis(500));
            session.evaluate_frame(Some(&curl(elbow)));
        }

        let stats = session.stats();
        assert_eq!(stats.reps, 2);
        assert_eq!(stats.calories, 1.0);
        assert_eq!(stats.stage, Stage::Up);
        assert_eq!(stats.duration, 2);
        assert_eq!(stats.feedback, Feedback::Correct);
    }

    #[test]
    fn test_zero_rep_session_discarded() {
        let (mut session, clock) = lifecycle();
        session.start(ExerciseKind::Pushup);
        clock.advance(Duration::from_secs(120));

        assert!(session.finalize().is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_plank_persisted_after_hold() {
        let (mut session, clock) = lifecycle();
        session.start(ExerciseKind::Plank);
        clock.advance(Duration::from_secs(20));

        let summary = session.finalize().unwrap();
        assert_eq!(summary.exercise, ExerciseKind::Plank);
        assert_eq!(summary.duration, 20);
        assert_eq!(summary.reps, 20);
        assert_eq!(summary.calories, 0.2);
    }

    #[test]
    fn test_short_plank_discarded() {
        let (mut session, clock) = lifecycle();
        session.start(ExerciseKind::Plank);
        clock.advance(Duration::from_millis(14_900));

        assert!(session.finalize().is_none());
    }

    #[test]
    fn test_plank_reps_track_elapsed_seconds() {
        let (mut session, clock) = lifecycle();
        session.start(ExerciseKind::Plank);

        clock.advance(Duration::from_millis(7_300));
        session.evaluate_frame(None);
        assert_eq!(session.stats().reps, 7);
        assert_eq!(session.feedback(), Feedback::EnsureFullBodyVisible);

        clock.advance(Duration::from_secs(5));
        let stats = session.stats();
        assert_eq!(stats.reps, 12);
        assert_eq!(stats.calories, 0.1);
    }

    #[test]
    fn test_switch_finalizes_previous() {
        let (mut session, clock) = lifecycle();
        session.start(ExerciseKind::BicepCurl);
        session.evaluate_frame(Some(&curl(170.0)));
        session.evaluate_frame(Some(&curl(20.0)));
        clock.advance(Duration::from_secs(8));

        let summary = session.start(ExerciseKind::Squat).unwrap();
        assert_eq!(summary.exercise, ExerciseKind::BicepCurl);
        assert_eq!(summary.reps, 1);
        assert_eq!(summary.calories, 0.5);
        assert_eq!(summary.duration, 8);

        assert_eq!(session.exercise(), Some(ExerciseKind::Squat));
        assert_eq!(session.stage(), Stage::None);
        assert_eq!(session.stats().reps, 0);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let (mut session, _) = lifecycle();
        session.start(ExerciseKind::BicepCurl);
        session.evaluate_frame(Some(&curl(170.0)));
        session.evaluate_frame(Some(&curl(20.0)));

        assert!(session.reset().is_some());
        assert!(!session.is_active());
        assert_eq!(session.feedback(), Feedback::SelectExercise);
        assert_eq!(session.stats(), LiveStats::idle(Feedback::SelectExercise));
        assert!(session.reset().is_none());
    }

    #[test]
    fn test_summary_stamped_with_wall_time() {
        let epoch = chrono::DateTime::parse_from_rfc3339("2025-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let clock = ManualClock::with_wall_epoch(epoch);
        let mut session = SessionLifecycle::new(Arc::new(clock.clone()));

        session.start(ExerciseKind::Plank);
        clock.advance(Duration::from_secs(30));

        let summary = session.reset().unwrap();
        assert_eq!(summary.timestamp, epoch + chrono::Duration::seconds(30));
    }
}
