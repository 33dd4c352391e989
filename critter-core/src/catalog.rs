//! Creature catalog
//!
//! The catalog is fixed at build time. A creature's index is its id and is
//! never reassigned; persisted ownership and IR beacons both refer to
//! creatures by id.

use critter_hal::{Color, SpriteId, StorageKey};

/// Number of creatures in the catalog
pub const CATALOG_SIZE: usize = 29;

/// Namespace of the per-creature storage keys
pub const KEY_NAMESPACE: &str = "monster";

/// Index of a catalog entry, always in `[0, CATALOG_SIZE)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CreatureId(u16);

impl CreatureId {
    /// First catalog entry
    pub const FIRST: CreatureId = CreatureId(0);

    /// Validate a raw id
    pub const fn new(raw: u16) -> Option<Self> {
        if (raw as usize) < CATALOG_SIZE {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Validate a catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().and_then(Self::new)
    }

    /// Starting creature of a badge: `device_id % CATALOG_SIZE`
    pub fn from_device_id(device_id: u64) -> Self {
        Self((device_id % CATALOG_SIZE as u64) as u16)
    }

    /// Raw id as carried in menu cookies and beacons
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Catalog index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Catalog entry for this id
    pub fn creature(self) -> &'static Creature {
        // In range by construction
        &CATALOG[self.index()]
    }

    /// Every id in catalog order
    pub fn all() -> impl Iterator<Item = CreatureId> {
        (0..CATALOG_SIZE as u16).map(CreatureId)
    }
}

/// One collectible creature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creature {
    /// Short unique name, also the menu label
    pub name: &'static str,
    /// Tint used for the name on the detail screen
    pub color: Color,
    /// Free text shown on the description screen
    pub description: &'static str,
    /// Portrait
    pub sprite: SpriteId,
}

impl Creature {
    /// Key under which ownership of this creature is persisted
    ///
    /// `"monster/<name>"`, truncated to the store's key length.
    pub fn storage_key(&self) -> StorageKey {
        StorageKey::namespaced(KEY_NAMESPACE, self.name)
    }
}

const fn creature(sprite: u8, name: &'static str, description: &'static str) -> Creature {
    Creature {
        name,
        color: Color::RED,
        description,
        sprite: SpriteId(sprite),
    }
}

/// All creatures, indexed by [`CreatureId`]
pub static CATALOG: [Creature; CATALOG_SIZE] = [
    creature(0, "cryptoraptor", "This one only roars in cryptocurrency"),
    creature(1, "2FactorTiger", "Double the security, double the fun"),
    creature(2, "firewallFlyer", "Can't touch this, unless you're an allowed IP"),
    creature(3, "trojanTurtle", "Slow and sneaky, never underestimate it"),
    creature(4, "phishinPhoenix", "Spams your inbox, then rises from its ashes"),
    creature(5, "hackerHawk", "Always watching from above, waiting to swoop in"),
    creature(6, "malwareMantis", "Prays on your system's vulnerabilities"),
    creature(7, "ddosDragon", "Breathes a fire of traffic at your servers"),
    creature(8, "keylogKoala", "It's not eucalyptus leaves it's after"),
    creature(9, "wormWombat", "Burrows deep into your system"),
    creature(10, "adwareAnteater", "Feeds on your browsing habits"),
    creature(11, "rootkitRhino", "Charges at your system's core"),
    creature(12, "botnetBat", "Flies in the darkness of the web"),
    creature(13, "dnsDolphin", "Loves to play redirect games"),
    creature(14, "sslShark", "Swims in a sea of encrypted data"),
    creature(15, "spamSpider", "Weaves a web of unwanted emails"),
    creature(16, "ransomRabbit", "Hops into your files, then locks them up"),
    creature(17, "snifferSnail", "Slow but can smell your data from miles away"),
    creature(18, "backdoorBee", "Buzzes into your system through the back"),
    creature(19, "exploitEagle", "Soars high to find unpatched vulnerabilities"),
    creature(20, "bruFrcBaboon", "Not subtle, but sometimes it works"),
    creature(21, "socNgnrSqrl", "Collects your info like acorns"),
    creature(22, "packSnifPuma", "Stealthily stalks your network traffic"),
    creature(23, "proxyPorcupn", "Its spikes are like multiple IP addresses"),
    creature(24, "intDetIguana", "Keeps a cold-blooded watch on your network"),
    creature(25, "penTestPengo", "Slides into your defenses with ease"),
    creature(26, "axsCtrlGator", "Keeps unauthorized users at bay, snappily"),
    creature(27, "idsImpalas", "Fast and efficient at detecting intrusions"),
    creature(28, "siemSloth", "Slow but steady wins the security race"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_bounds() {
        assert!(CreatureId::new(0).is_some());
        assert!(CreatureId::new(28).is_some());
        assert!(CreatureId::new(29).is_none());
        assert!(CreatureId::from_index(usize::MAX).is_none());
    }

    #[test]
    fn test_from_device_id() {
        assert_eq!(CreatureId::from_device_id(59).raw(), 1);
        assert_eq!(CreatureId::from_device_id(29).raw(), 0);
        assert_eq!(
            CreatureId::from_device_id(u64::MAX).raw(),
            (u64::MAX % 29) as u16
        );
    }

    #[test]
    fn test_all_in_order() {
        let ids: heapless::Vec<u16, CATALOG_SIZE> = CreatureId::all().map(|id| id.raw()).collect();
        assert_eq!(ids.len(), CATALOG_SIZE);
        assert!(ids.iter().enumerate().all(|(i, &raw)| raw as usize == i));
    }

    #[test]
    fn test_names_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in CATALOG.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_storage_keys_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in CATALOG.iter().skip(i + 1) {
                assert_ne!(a.storage_key(), b.storage_key(), "{} / {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_storage_key_format() {
        let key = CreatureId::new(9).map(|id| id.creature().storage_key());
        assert_eq!(key.as_ref().map(|k| k.as_str()), Some("monster/wormWombat"));
    }

    #[test]
    fn test_sprite_matches_index() {
        for id in CreatureId::all() {
            assert_eq!(id.creature().sprite, SpriteId(id.raw() as u8));
        }
    }
}
