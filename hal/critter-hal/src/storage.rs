//! Persistent key/value storage
//!
//! Keys are short UTF-8 strings, values are integers. A missing key is not
//! an error: callers treat it as "never written".

use heapless::String;

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 20;

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash operation failed
    Flash,
    /// Storage is full
    Full,
    /// Data corrupted or invalid
    Corrupted,
    /// Key longer than [`MAX_KEY_LEN`]
    KeyTooLong,
}

/// Storage key of at most [`MAX_KEY_LEN`] bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey(String<MAX_KEY_LEN>);

impl StorageKey {
    /// Create a key, rejecting anything longer than [`MAX_KEY_LEN`]
    pub fn new(key: &str) -> Result<Self, StorageError> {
        let mut s = String::new();
        s.push_str(key).map_err(|_| StorageError::KeyTooLong)?;
        Ok(Self(s))
    }

    /// Create `"<namespace>/<name>"`, truncating to [`MAX_KEY_LEN`] bytes
    ///
    /// Truncation never splits a UTF-8 character.
    pub fn namespaced(namespace: &str, name: &str) -> Self {
        let mut s: String<MAX_KEY_LEN> = String::new();
        for ch in namespace.chars().chain(core::iter::once('/')).chain(name.chars()) {
            if s.push(ch).is_err() {
                break;
            }
        }
        Self(s)
    }

    /// Key text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StorageKey {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0.as_str());
    }
}

/// Integer key/value storage
///
/// Implementations may cache writes in RAM and commit them later, as long
/// as a `get_int` after a successful `set_int` returns the written value.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if it was never written
    fn get_int(&mut self, key: &StorageKey) -> Option<i32>;

    /// Store `value` under `key`
    fn set_int(&mut self, key: &StorageKey, value: i32) -> Result<(), StorageError>;
}

/// Durable backing for a write-back cache
pub trait RecordSink {
    /// Persist `value` under `key`
    fn store(
        &mut self,
        key: &StorageKey,
        value: i32,
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

/// Outcome of one commit pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommitReport {
    /// Records the sink accepted
    pub written: usize,
    /// Records the sink refused
    pub failed: usize,
}

/// Write each pending record, carrying on past refused ones
///
/// `committed` runs for every record the sink accepted, so the cache can
/// clear its dirty flag. Refused records are left for the next pass.
pub async fn commit_pending<S: RecordSink>(
    sink: &mut S,
    pending: impl IntoIterator<Item = (StorageKey, i32)>,
    mut committed: impl FnMut(&StorageKey, i32),
) -> CommitReport {
    let mut report = CommitReport::default();
    for (key, value) in pending {
        match sink.store(&key, value).await {
            Ok(()) => {
                committed(&key, value);
                report.written += 1;
            }
            Err(_) => report.failed += 1,
        }
    }
    report
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let bytes = self.0.as_bytes();
        if buffer.len() < bytes.len() + 1 {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = bytes.len() as u8;
        buffer[1..1 + bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len() + 1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let len = *buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?
            as usize;
        if len > MAX_KEY_LEN {
            return Err(sequential_storage::map::SerializationError::InvalidFormat);
        }
        let bytes = buffer
            .get(1..1 + len)
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        let text = core::str::from_utf8(bytes)
            .map_err(|_| sequential_storage::map::SerializationError::InvalidFormat)?;
        let key = StorageKey::new(text)
            .map_err(|_| sequential_storage::map::SerializationError::InvalidFormat)?;
        Ok((key, len + 1))
    }
}
