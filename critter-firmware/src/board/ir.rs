//! `IrTransport` over the IR task channels

use defmt::*;
use portable_atomic::Ordering;

use critter_hal::IrTransport;
use critter_protocol::IrPacket;

use crate::channels::{IR_LISTENING, IR_RX, IR_TX};

/// Hands packets to the UART tasks without waiting
pub struct ChannelIr;

impl IrTransport for ChannelIr {
    fn send(&mut self, packet: IrPacket) {
        if IR_TX.try_send(packet).is_err() {
            warn!("IR TX queue full, dropping beacon");
        }
    }

    fn poll_received(&mut self) -> Option<IrPacket> {
        IR_RX.try_receive().ok()
    }

    fn set_listening(&mut self, listening: bool) {
        IR_LISTENING.store(listening, Ordering::Release);
        if !listening {
            // Packets queued before the switch are stale
            IR_RX.clear();
        }
    }
}
