//! Frame pacing
//!
//! Decides how long the game loop sleeps after each tick.

pub mod frame;

pub use frame::{FrameScheduler, FrameStats, FrameWait};
