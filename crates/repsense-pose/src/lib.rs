//! RepSense Pose - exercise evaluation
//!
//! Turns a skeleton into (stage, repetition, feedback) for the active exercise.
//!
//! # Pipeline
//!
//! Skeleton → per-exercise measurement (1-2 joint angles) → rule table
//! (form gate + two-threshold hysteresis) → Evaluation
//!
//! A repetition needs the motion value to cross the baseline threshold (arming
//! the stage) and then the confirm threshold while armed. Jitter around a
//! single threshold can never count twice.
//!
//! Evaluation never fails: missing bodies and missing landmarks surface as
//! visibility feedback and leave the stage untouched.

pub mod evaluator;
pub mod rule;

pub use evaluator::*;
pub use rule::*;
