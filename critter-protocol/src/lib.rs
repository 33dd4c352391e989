//! Critter Infrared Trade Protocol
//!
//! This crate defines what two badges say to each other while trading, and
//! the button bits the input collaborator reports. It is deliberately tiny:
//! one opcode, one packet shape.
//!
//! # Packet Overview
//!
//! Every IR packet is a single 32-bit word:
//! ```text
//! ┌───────┬─────────┬─────────┬───────────┬──────────────────┐
//! │ START │ COMMAND │ ADDRESS │ RECIPIENT │ PAYLOAD          │
//! │ 1b    │ 1b      │ 5b      │ 9b        │ 16b              │
//! └───────┴─────────┴─────────┴───────────┴──────────────────┘
//! ```
//!
//! The trade beacon payload carries an opcode in its top 4 bits and a
//! creature id in its low 9 bits. When the transceiver hangs off a UART,
//! words travel inside a 6-byte frame (see [`frame`]).

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod frame;
pub mod packet;

pub use buttons::{Button, ButtonMask};
pub use frame::{encode_frame, FrameError, FrameParser, FRAME_LEN, FRAME_START};
pub use packet::{
    BeaconPayload, IrPacket, Opcode, PacketError, BROADCAST_ID, GAME_ADDRESS, PAYLOAD_ID_MASK,
};
