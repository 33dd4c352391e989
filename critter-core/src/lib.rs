//! Board-agnostic game logic for the Critter badge
//!
//! This crate contains everything about the creature collection game that
//! does not depend on specific hardware:
//!
//! - Creature catalog and persisted ownership
//! - Application state machine and its controller
//! - Menu level management and screen layouts
//! - Trade beacon
//! - Frame pacing arithmetic
//! - Configuration types
//!
//! Hardware is reached only through the `critter-hal` traits, so the whole
//! game runs on the host in tests.

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod app;
pub mod beacon;
pub mod catalog;
pub mod config;
pub mod menu;
pub mod ownership;
pub mod scheduler;
pub mod state;
pub mod view;

pub use app::{AppController, BadgeIo};
pub use catalog::{Creature, CreatureId, CATALOG, CATALOG_SIZE};
pub use config::{GameConfig, Tone};
pub use menu::{MenuLevel, MENU_CAPACITY};
pub use ownership::{OwnershipStore, SaveReport};
pub use state::{AppState, Event, GameState};
