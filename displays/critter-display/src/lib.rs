//! Display components for Critter badges
//!
//! This crate provides:
//! - `DynMenu` - the scrollable menu widget behind `critter_hal::MenuWidget`
//! - `Framebuffer` - an RGB565 back buffer usable as an `embedded-graphics` target
//! - `GraphicsRenderer` - `critter_hal::Renderer` on top of a framebuffer and a `Panel`
//!
//! # Architecture
//!
//! The game draws through the `Renderer` trait into the framebuffer. Only
//! `present` touches the hardware, by handing the finished frame to a
//! `Panel` implementation (an SPI LCD driver on the badge, a recorder in
//! tests).

#![no_std]
#![deny(unsafe_code)]

pub mod framebuffer;
pub mod menu;
pub mod renderer;

// Re-export key types
pub use framebuffer::Framebuffer;
pub use menu::{DynMenu, MenuStyle};
pub use renderer::{GraphicsRenderer, Panel, Sprite};
