//! RepSense Runtime - frame pipeline orchestration
//!
//! Per camera frame the pipeline runs:
//! 1. Count the frame
//! 2. Run pose inference on every `skip_factor`-th frame (downscaled copy)
//! 3. Replace or reuse the cached skeleton
//! 4. Evaluate the active exercise against the cached skeleton
//! 5. Update session totals under the session lock
//!
//! Control operations (start, switch, reset) go through the same lock, and
//! finished sessions are handed to a summary sink outside of it.

pub mod config;
pub mod frame;
pub mod handle;
pub mod logging;
pub mod pipeline;
pub mod scheduler;
pub mod sink;
pub mod source;

pub use config::*;
pub use frame::*;
pub use handle::*;
pub use logging::*;
pub use pipeline::*;
pub use scheduler::*;
pub use sink::*;
pub use source::*;
