//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod beeper;
pub mod frame;
pub mod input;
pub mod ir;
pub mod storage;

pub use beeper::beeper_task;
pub use frame::frame_task;
pub use input::{buttons_task, encoder_task};
pub use ir::{ir_rx_task, ir_tx_task};
pub use storage::storage_task;
