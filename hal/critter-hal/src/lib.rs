//! Critter Hardware Abstraction Layer
//!
//! This crate defines the collaborators the game core talks to. Board
//! crates implement them for real hardware; tests implement them in memory.
//! Every call is fire-and-forget or poll-based so the game loop never blocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  critter-core (AppController::tick)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  critter-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ critter-      │       │ critter-      │
//! │   firmware    │       │   display     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`input::ButtonInput`] - Latched buttons and rotary encoders
//! - [`display::Renderer`] - Drawing primitives with an explicit `present`
//! - [`menu::MenuWidget`] - Scrollable menu storage and drawing
//! - [`storage::KeyValueStore`] - Persistent integer storage
//! - [`ir::IrTransport`] - Infrared packet send/receive
//! - [`system::Audio`], [`system::DeviceIdentity`], [`system::Launcher`]

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod ir;
pub mod menu;
pub mod storage;
pub mod system;

// Re-export key traits at crate root for convenience
pub use display::{Color, DisplayError, Renderer, SpriteId};
pub use input::ButtonInput;
pub use ir::IrTransport;
pub use menu::{MenuError, MenuItem, MenuWidget};
pub use storage::{
    commit_pending, CommitReport, KeyValueStore, RecordSink, StorageError, StorageKey, MAX_KEY_LEN,
};
pub use system::{Audio, DeviceIdentity, Launcher};
