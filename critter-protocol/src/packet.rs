//! IR packet layout and the trade beacon payload
//!
//! Packet word (MSB first):
//! - START (1 bit): always 1
//! - COMMAND (1 bit): always 1 for application packets
//! - ADDRESS (5 bits): application address, shared by all badges running the game
//! - RECIPIENT (9 bits): target badge id, [`BROADCAST_ID`] for everyone
//! - PAYLOAD (16 bits): application data

/// Application address of the creature game
pub const GAME_ADDRESS: u8 = 0x13;

/// Recipient id meaning "every badge in range"
pub const BROADCAST_ID: u16 = 0;

/// Mask for the creature id carried in a beacon payload
pub const PAYLOAD_ID_MASK: u16 = 0x01FF;

const START_SHIFT: u32 = 31;
const COMMAND_SHIFT: u32 = 30;
const ADDRESS_SHIFT: u32 = 25;
const RECIPIENT_SHIFT: u32 = 16;

const ADDRESS_MASK: u32 = 0x1F;
const RECIPIENT_MASK: u32 = 0x1FF;
const PAYLOAD_MASK: u32 = 0xFFFF;

const OPCODE_SHIFT: u16 = 12;

// Wire format values
const OPCODE_XMIT_MONSTER: u8 = 0x1;

/// Errors interpreting a received packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Packet is for another application
    WrongAddress(u8),
    /// Payload opcode is not one we speak
    UnknownOpcode(u8),
    /// Start or command bit missing
    Malformed,
}

/// Beacon opcodes (top 4 bits of the payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// "This is the creature I started with"
    XmitMonster,
}

impl Opcode {
    /// Parse an opcode from its 4-bit wire value
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            OPCODE_XMIT_MONSTER => Some(Opcode::XmitMonster),
            _ => None,
        }
    }

    /// Convert to the 4-bit wire value
    pub fn to_bits(self) -> u8 {
        match self {
            Opcode::XmitMonster => OPCODE_XMIT_MONSTER,
        }
    }
}

/// A single IR packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrPacket {
    /// Application address (5 bits)
    pub address: u8,
    /// Recipient badge id (9 bits)
    pub recipient: u16,
    /// Application payload
    pub payload: u16,
}

impl IrPacket {
    /// Build a packet, masking address and recipient to their field widths
    pub fn new(address: u8, recipient: u16, payload: u16) -> Self {
        Self {
            address: address & ADDRESS_MASK as u8,
            recipient: recipient & RECIPIENT_MASK as u16,
            payload,
        }
    }

    /// Pack into the 32-bit wire word
    pub fn to_word(self) -> u32 {
        (1 << START_SHIFT)
            | (1 << COMMAND_SHIFT)
            | ((self.address as u32 & ADDRESS_MASK) << ADDRESS_SHIFT)
            | ((self.recipient as u32 & RECIPIENT_MASK) << RECIPIENT_SHIFT)
            | (self.payload as u32 & PAYLOAD_MASK)
    }

    /// Unpack a 32-bit wire word
    pub fn from_word(word: u32) -> Result<Self, PacketError> {
        if (word >> START_SHIFT) & 1 == 0 || (word >> COMMAND_SHIFT) & 1 == 0 {
            return Err(PacketError::Malformed);
        }
        Ok(Self {
            address: ((word >> ADDRESS_SHIFT) & ADDRESS_MASK) as u8,
            recipient: ((word >> RECIPIENT_SHIFT) & RECIPIENT_MASK) as u16,
            payload: (word & PAYLOAD_MASK) as u16,
        })
    }

    /// Interpret this packet as a creature game beacon
    pub fn beacon(&self) -> Result<BeaconPayload, PacketError> {
        if self.address != GAME_ADDRESS {
            return Err(PacketError::WrongAddress(self.address));
        }
        BeaconPayload::decode(self.payload)
    }
}

/// Decoded trade beacon payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconPayload {
    pub opcode: Opcode,
    /// Raw creature id, not yet validated against the catalog
    pub creature: u16,
}

impl BeaconPayload {
    /// Beacon advertising `creature`
    pub fn xmit_monster(creature: u16) -> Self {
        Self {
            opcode: Opcode::XmitMonster,
            creature: creature & PAYLOAD_ID_MASK,
        }
    }

    /// `(opcode << 12) | (creature & 0x1FF)`
    pub fn encode(self) -> u16 {
        ((self.opcode.to_bits() as u16) << OPCODE_SHIFT) | (self.creature & PAYLOAD_ID_MASK)
    }

    /// Split a payload into opcode and creature id
    pub fn decode(payload: u16) -> Result<Self, PacketError> {
        let bits = (payload >> OPCODE_SHIFT) as u8;
        let opcode = Opcode::from_bits(bits).ok_or(PacketError::UnknownOpcode(bits))?;
        Ok(Self {
            opcode,
            creature: payload & PAYLOAD_ID_MASK,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_beacon_payload_layout() {
        let payload = BeaconPayload::xmit_monster(1).encode();
        assert_eq!(payload, (0x1 << 12) | 1);
    }

    #[test]
    fn test_beacon_masks_creature_to_nine_bits() {
        let payload = BeaconPayload::xmit_monster(0x3FF).encode();
        assert_eq!(payload & PAYLOAD_ID_MASK, 0x1FF);
        assert_eq!(payload >> 12, 0x1);
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(
            BeaconPayload::decode(0xF005),
            Err(PacketError::UnknownOpcode(0xF))
        );
    }

    #[test]
    fn test_foreign_address_rejected() {
        let packet = IrPacket::new(0x02, BROADCAST_ID, BeaconPayload::xmit_monster(4).encode());
        assert_eq!(packet.beacon(), Err(PacketError::WrongAddress(0x02)));
    }

    #[test]
    fn test_word_sets_start_and_command_bits() {
        let word = IrPacket::new(GAME_ADDRESS, BROADCAST_ID, 0).to_word();
        assert_eq!(word >> 30, 0b11);
    }

    #[test]
    fn test_malformed_word() {
        assert_eq!(IrPacket::from_word(0x0000_1234), Err(PacketError::Malformed));
    }

    proptest! {
        #[test]
        fn word_layout_preserves_fields(address in 0u8..32, recipient in 0u16..512, payload in any::<u16>()) {
            let packet = IrPacket::new(address, recipient, payload);
            prop_assert_eq!(IrPacket::from_word(packet.to_word()), Ok(packet));
        }

        #[test]
        fn beacon_decode_recovers_creature(creature in 0u16..512) {
            let decoded = BeaconPayload::decode(BeaconPayload::xmit_monster(creature).encode());
            prop_assert_eq!(decoded.map(|b| b.creature), Ok(creature));
        }
    }
}
