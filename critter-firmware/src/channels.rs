//! Inter-task communication channels
//!
//! The frame task owns the game. Everything with real-time needs (IR UART,
//! beeper, flash, button scanning) runs in its own task and talks to the
//! frame task through these statics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicI32, AtomicU16};

use critter_core::Tone;
use critter_protocol::IrPacket;

/// Packets waiting to be sent
const IR_TX_SIZE: usize = 4;

/// Received packets waiting for the game
const IR_RX_SIZE: usize = 16;

/// Outgoing IR packets (frame task -> IR TX task)
pub static IR_TX: Channel<CriticalSectionRawMutex, IrPacket, IR_TX_SIZE> = Channel::new();

/// Incoming IR packets (IR RX task -> frame task)
pub static IR_RX: Channel<CriticalSectionRawMutex, IrPacket, IR_RX_SIZE> = Channel::new();

/// True while the game accepts received packets
pub static IR_LISTENING: AtomicBool = AtomicBool::new(false);

/// Latest requested tone; a new beep replaces one still playing
pub static BEEP: Signal<CriticalSectionRawMutex, Tone> = Signal::new();

/// Cached ownership changed and should be written to flash
pub static FLUSH_STORAGE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Buttons pressed since the frame task last looked (ButtonMask bits)
pub static BUTTON_LATCH: AtomicU16 = AtomicU16::new(0);

/// Encoder detents since the frame task last looked, one per axis
pub static ROTARY: [AtomicI32; 2] = [AtomicI32::new(0), AtomicI32::new(0)];
