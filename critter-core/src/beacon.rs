//! Trade beacon
//!
//! While trading, every `interval`-th tick broadcasts the badge's starting
//! creature and chirps.

use critter_hal::{Audio, IrTransport};
use critter_protocol::{BeaconPayload, IrPacket, BROADCAST_ID, GAME_ADDRESS};

use crate::catalog::CreatureId;
use crate::config::Tone;

/// Periodic beacon transmitter
#[derive(Debug, Clone)]
pub struct TradeBeacon {
    counter: u32,
    interval: u32,
    tone: Tone,
    sent: u32,
}

impl TradeBeacon {
    /// Create a beacon firing every `interval_ticks` ticks
    ///
    /// An interval of zero is treated as one.
    pub const fn new(interval_ticks: u32, tone: Tone) -> Self {
        Self {
            counter: 0,
            interval: if interval_ticks == 0 { 1 } else { interval_ticks },
            tone,
            sent: 0,
        }
    }

    /// Restart the tick count, done on every entry to trading
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Ticks since the last reset
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Beacons sent since power-up
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Packet advertising `creature`
    pub fn packet(creature: CreatureId) -> IrPacket {
        IrPacket::new(
            GAME_ADDRESS,
            BROADCAST_ID,
            BeaconPayload::xmit_monster(creature.raw()).encode(),
        )
    }

    /// Count one trading tick, transmitting when the interval is reached
    ///
    /// Returns true if a beacon was sent.
    pub fn tick(
        &mut self,
        creature: CreatureId,
        ir: &mut dyn IrTransport,
        audio: &mut dyn Audio,
    ) -> bool {
        self.counter = self.counter.wrapping_add(1);
        if self.counter % self.interval != 0 {
            return false;
        }
        ir.send(Self::packet(creature));
        audio.beep(self.tone.frequency_hz, self.tone.duration_ms);
        self.sent = self.sent.wrapping_add(1);
        trace!("beacon {} for creature {}", self.sent, creature.raw());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_protocol::Opcode;
    use heapless::Vec;

    #[derive(Default)]
    struct IrLog(Vec<IrPacket, 8>);

    impl IrTransport for IrLog {
        fn send(&mut self, packet: IrPacket) {
            let _ = self.0.push(packet);
        }
        fn poll_received(&mut self) -> Option<IrPacket> {
            None
        }
        fn set_listening(&mut self, _listening: bool) {}
    }

    #[derive(Default)]
    struct BeepLog(Vec<(u16, u16), 8>);

    impl Audio for BeepLog {
        fn beep(&mut self, frequency_hz: u16, duration_ms: u16) {
            let _ = self.0.push((frequency_hz, duration_ms));
        }
    }

    fn run(beacon: &mut TradeBeacon, ticks: u32, ir: &mut IrLog, audio: &mut BeepLog) {
        let creature = CreatureId::new(1).unwrap();
        for _ in 0..ticks {
            beacon.tick(creature, ir, audio);
        }
    }

    fn beacon() -> TradeBeacon {
        TradeBeacon::new(10, Tone::new(500, 100))
    }

    #[test]
    fn test_nine_ticks_send_nothing() {
        let mut beacon = beacon();
        let (mut ir, mut audio) = (IrLog::default(), BeepLog::default());
        run(&mut beacon, 9, &mut ir, &mut audio);
        assert!(ir.0.is_empty());
        assert!(audio.0.is_empty());
    }

    #[test]
    fn test_tenth_tick_sends_one() {
        let mut beacon = beacon();
        let (mut ir, mut audio) = (IrLog::default(), BeepLog::default());
        run(&mut beacon, 10, &mut ir, &mut audio);
        assert_eq!(ir.0.len(), 1);
        assert_eq!(audio.0.as_slice(), &[(500, 100)]);
        assert_eq!(beacon.sent(), 1);

        let packet = ir.0[0];
        assert_eq!(packet.address, GAME_ADDRESS);
        assert_eq!(packet.recipient, BROADCAST_ID);
        assert_eq!(packet.payload, (0x1 << 12) | 1);
        let decoded = packet.beacon().unwrap();
        assert_eq!(decoded.opcode, Opcode::XmitMonster);
        assert_eq!(decoded.creature, 1);
    }

    #[test]
    fn test_reset_restarts_count() {
        let mut beacon = beacon();
        let (mut ir, mut audio) = (IrLog::default(), BeepLog::default());
        run(&mut beacon, 7, &mut ir, &mut audio);
        beacon.reset();
        assert_eq!(beacon.counter(), 0);
        run(&mut beacon, 9, &mut ir, &mut audio);
        assert!(ir.0.is_empty());
        run(&mut beacon, 1, &mut ir, &mut audio);
        assert_eq!(ir.0.len(), 1);
    }

    #[test]
    fn test_zero_interval_fires_every_tick() {
        let mut beacon = TradeBeacon::new(0, Tone::new(500, 100));
        let (mut ir, mut audio) = (IrLog::default(), BeepLog::default());
        run(&mut beacon, 3, &mut ir, &mut audio);
        assert_eq!(ir.0.len(), 3);
    }
}
