//! Platform abstraction layer
//!
//! Host-facing plumbing that stays out of the simulation:
//! - Frame timing (start/stop, per-frame dt)
//! - Input events (key mapping, attachable queue)

pub mod clock;
pub mod input;

pub use clock::FrameLoop;
pub use input::{InputQueue, key_to_input};
