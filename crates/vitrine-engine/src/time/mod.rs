//! Time subsystem.
//!
//! Frame timing decoupled from any event loop:
//! - one `FrameClock` per page (or per simulation)
//! - `tick()` against the wall clock, or `advance(dt)` for scripted time

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
