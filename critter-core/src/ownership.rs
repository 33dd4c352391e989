//! Persisted creature ownership
//!
//! One boolean per catalog entry. Only owned creatures are ever written to
//! storage; a missing key reads as "not owned". Ownership is only granted,
//! never revoked.

use critter_hal::{Audio, KeyValueStore};

use crate::catalog::{CreatureId, CATALOG_SIZE};
use crate::config::Tone;

/// Value stored under an owned creature's key
pub const OWNED_VALUE: i32 = 1;

/// Outcome of [`OwnershipStore::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaveReport {
    /// Keys written successfully
    pub written: u8,
    /// Keys the store refused
    pub failed: u8,
}

impl SaveReport {
    /// Returns true if every owned creature was written
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Ownership bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipStore {
    owned: [bool; CATALOG_SIZE],
    grant_tone: Tone,
}

impl OwnershipStore {
    /// Create a store with nothing owned
    pub const fn new(grant_tone: Tone) -> Self {
        Self {
            owned: [false; CATALOG_SIZE],
            grant_tone,
        }
    }

    /// Replace the in-memory set with what `store` holds
    pub fn load(&mut self, store: &mut dyn KeyValueStore) {
        for id in CreatureId::all() {
            let key = id.creature().storage_key();
            self.owned[id.index()] = match store.get_int(&key) {
                Some(value) => value != 0,
                None => {
                    trace!("no entry for {}", key);
                    false
                }
            };
        }
        debug!("loaded {} owned creatures", self.owned_count());
    }

    /// Write every owned creature to `store`
    ///
    /// A refused write is logged and skipped; the remaining keys are still
    /// written.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> SaveReport {
        let mut report = SaveReport::default();
        for id in self.owned_ids() {
            let key = id.creature().storage_key();
            match store.set_int(&key, OWNED_VALUE) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    error!("failed to save {}: {}", key, e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Mark `id` owned and play the acknowledgment tone
    ///
    /// Granting an owned creature only repeats the tone.
    pub fn grant(&mut self, id: CreatureId, audio: &mut dyn Audio) {
        self.owned[id.index()] = true;
        audio.beep(self.grant_tone.frequency_hz, self.grant_tone.duration_ms);
        debug!("granted creature {}", id.raw());
    }

    /// Validate `raw` and grant it
    ///
    /// Out-of-range ids are logged and ignored.
    pub fn grant_raw(&mut self, raw: u16, audio: &mut dyn Audio) -> Option<CreatureId> {
        match CreatureId::new(raw) {
            Some(id) => {
                self.grant(id, audio);
                Some(id)
            }
            None => {
                warn!("grant: creature id {} out of range", raw);
                None
            }
        }
    }

    /// Grant the whole catalog
    pub fn grant_all(&mut self, audio: &mut dyn Audio) {
        for id in CreatureId::all() {
            self.grant(id, audio);
        }
    }

    /// Returns true if `id` is owned
    pub fn is_owned(&self, id: CreatureId) -> bool {
        self.owned[id.index()]
    }

    /// Number of owned creatures
    pub fn owned_count(&self) -> usize {
        self.owned.iter().filter(|&&owned| owned).count()
    }

    /// Owned ids in catalog order
    pub fn owned_ids(&self) -> impl Iterator<Item = CreatureId> + '_ {
        CreatureId::all().filter(move |&id| self.owned[id.index()])
    }
}
