//! RepSense Time - clocks for session timing
//!
//! Session durations, plank holds and calorie totals are all derived from a
//! `Clock`. Production code uses `SystemClock`; tests drive a `ManualClock`
//! so that elapsed-time rules can be checked without sleeping.

pub mod clock;

pub use clock::*;
