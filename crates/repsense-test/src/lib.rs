//! RepSense Test Harness
//!
//! This crate provides:
//! - Pose synthesis with exact joint angles (optionally jittered)
//! - Scripted pose sources for driving the frame pipeline
//! - A workout rig with a manual clock and in-memory history
//! - End-to-end workout scenarios

pub mod scenario;
pub mod simulator;

pub use scenario::*;
pub use simulator::*;
