//! Badge hardware
//!
//! Implementations of the `critter-hal` collaborators for the RP2040 badge,
//! plus the drivers the background tasks use.
//!
//! # Pin assignment
//!
//! | Function            | GPIO          |
//! |---------------------|---------------|
//! | Beeper              | 3             |
//! | IR UART1 TX / RX    | 4 / 5         |
//! | Buttons (active low)| 8-15          |
//! | Display DC / CS     | 16 / 17       |
//! | Display SCK / MOSI  | 18 / 19       |
//! | Display reset       | 20            |
//! | Left encoder A / B  | 21 / 22       |
//! | Right encoder A / B | 26 / 27       |

pub mod input;
pub mod ir;
pub mod s6b33;
pub mod storage;
pub mod system;

pub use input::LatchedInput;
pub use ir::ChannelIr;
pub use s6b33::S6b33;
pub use storage::CachedStore;
pub use system::{BadgeIdentity, Beeper, RestartLauncher};
