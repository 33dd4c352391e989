//! Infrared transport
//!
//! Sending is fire-and-forget. Received packets queue up below this trait
//! until the game drains them; the queue is bounded and drops the newest
//! packet when full.

use critter_protocol::IrPacket;

/// Infrared packet transport
pub trait IrTransport {
    /// Queue a packet for transmission
    fn send(&mut self, packet: IrPacket);

    /// Take the oldest received packet, if any
    fn poll_received(&mut self) -> Option<IrPacket>;

    /// Start or stop accepting packets into the receive queue
    fn set_listening(&mut self, listening: bool);
}
