//! Ownership store on RP2040 flash
//!
//! The game reads and writes a RAM cache synchronously. Writes mark the
//! entry dirty and wake the storage task, which commits dirty entries to
//! a sequential-storage map in the last 64KB of flash.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::{LinearMap, Vec};
use sequential_storage::cache::NoCache;
use sequential_storage::map;
use serde::{Deserialize, Serialize};

use critter_hal::{commit_pending, CommitReport, KeyValueStore, RecordSink, StorageError, StorageKey};

use crate::channels::FLUSH_STORAGE;

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
pub const STORE_PARTITION_SIZE: usize = 64 * 1024;
pub const STORE_PARTITION_START: usize = FLASH_SIZE - STORE_PARTITION_SIZE;

/// Flash range of the key/value map
pub const STORE_RANGE: core::ops::Range<u32> =
    (STORE_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Keys held in RAM
pub const CACHE_CAPACITY: usize = 32;

/// Scratch space for one map item
const DATA_BUFFER_SIZE: usize = 128;

/// Flash handle owned by the storage task
pub type BadgeFlash = Flash<'static, FLASH, Async, FLASH_SIZE>;

/// One persisted value as written to flash
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Record {
    value: i32,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: i32,
    dirty: bool,
}

type Cache = LinearMap<StorageKey, Entry, CACHE_CAPACITY>;

static CACHE: Mutex<CriticalSectionRawMutex, RefCell<Cache>> =
    Mutex::new(RefCell::new(LinearMap::new()));

/// `KeyValueStore` over the RAM cache
pub struct CachedStore;

impl KeyValueStore for CachedStore {
    fn get_int(&mut self, key: &StorageKey) -> Option<i32> {
        CACHE.lock(|cache| cache.borrow().get(key).map(|entry| entry.value))
    }

    fn set_int(&mut self, key: &StorageKey, value: i32) -> Result<(), StorageError> {
        let changed = CACHE.lock(|cache| {
            let mut cache = cache.borrow_mut();
            if cache.get(key).is_some_and(|entry| entry.value == value) {
                return Ok(false);
            }
            cache
                .insert(key.clone(), Entry { value, dirty: true })
                .map(|_| true)
                .map_err(|_| StorageError::Full)
        })?;
        if changed {
            FLUSH_STORAGE.signal(());
        }
        Ok(())
    }
}

/// Fill the cache with whatever flash holds for `keys`
pub async fn load(flash: &mut BadgeFlash, keys: impl Iterator<Item = StorageKey>) {
    let mut data_buffer = [0u8; DATA_BUFFER_SIZE];
    let mut loaded = 0usize;

    for key in keys {
        let result = map::fetch_item::<StorageKey, &[u8], _>(
            flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some(bytes)) => match postcard::from_bytes::<Record>(bytes) {
                Ok(record) => {
                    let inserted = CACHE.lock(|cache| {
                        cache.borrow_mut().insert(
                            key.clone(),
                            Entry {
                                value: record.value,
                                dirty: false,
                            },
                        )
                    });
                    if inserted.is_err() {
                        warn!("Storage cache full, not loading {}", key);
                    } else {
                        loaded += 1;
                    }
                }
                Err(_) => warn!("Corrupted record for {}", key),
            },
            Ok(None) => trace!("No record for {}", key),
            Err(_) => warn!("Flash read failed for {}", key),
        }
    }

    info!("Loaded {} records from flash", loaded);
}

/// Sequential-storage map as the cache's backing store
struct FlashSink<'a> {
    flash: &'a mut BadgeFlash,
    data_buffer: [u8; DATA_BUFFER_SIZE],
}

impl RecordSink for FlashSink<'_> {
    async fn store(&mut self, key: &StorageKey, value: i32) -> Result<(), StorageError> {
        let mut encoded = [0u8; 8];
        let bytes: &[u8] = postcard::to_slice(&Record { value }, &mut encoded)
            .map_err(|_| StorageError::Corrupted)?;

        map::store_item(
            &mut *self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut self.data_buffer,
            key,
            &bytes,
        )
        .await
        .map_err(|_| {
            warn!("Failed to commit {}", key);
            StorageError::Flash
        })
    }
}

/// Commit every dirty cache entry
///
/// A refused entry does not stop the pass. Entries that failed, or were
/// rewritten while the flash write was in progress, stay dirty.
pub async fn flush(flash: &mut BadgeFlash) -> CommitReport {
    let pending: Vec<(StorageKey, i32), CACHE_CAPACITY> = CACHE.lock(|cache| {
        cache
            .borrow()
            .iter()
            .filter(|(_, entry)| entry.dirty)
            .map(|(key, entry)| (key.clone(), entry.value))
            .collect()
    });

    let mut sink = FlashSink {
        flash,
        data_buffer: [0u8; DATA_BUFFER_SIZE],
    };
    commit_pending(&mut sink, pending, |key, value| {
        CACHE.lock(|cache| {
            if let Some(entry) = cache.borrow_mut().get_mut(key) {
                if entry.value == value {
                    entry.dirty = false;
                }
            }
        });
    })
    .await
}
