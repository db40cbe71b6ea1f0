//! RepSense Session - workout session state
//!
//! This crate owns everything that outlives a single frame:
//! - Rep, duration and calorie accumulation
//! - Session lifecycle (start, switch, reset) and the persistence rule
//! - Summary records and the append-only history log
//! - Aggregate history reports

pub mod accumulator;
pub mod history;
pub mod lifecycle;
pub mod report;
pub mod summary;

pub use accumulator::*;
pub use history::*;
pub use lifecycle::*;
pub use report::*;
pub use summary::*;
