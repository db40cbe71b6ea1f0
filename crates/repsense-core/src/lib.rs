//! RepSense Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the pipeline:
//! - Landmarks and skeletons (Joint, Point2D, Skeleton)
//! - The closed exercise catalog (ExerciseKind)
//! - Repetition stage and feedback vocabulary
//! - Monotonic timestamps
//! - Angle geometry

pub mod error;
pub mod exercise;
pub mod feedback;
pub mod geometry;
pub mod skeleton;
pub mod time;

pub use error::*;
pub use exercise::*;
pub use feedback::*;
pub use geometry::*;
pub use skeleton::*;
pub use time::*;
