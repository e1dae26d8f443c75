use core::fmt::Debug;

use ics23::CommitmentProof;

use crate::types::{Height, Path, RawHeight};
use crate::utils::Async;

/// A versioned key-value store. Writes go to the pending state; `commit`
/// seals it as the next height.
pub trait Store: Async + Clone {
    type Error: Debug;

    /// Sets `value` at `path` in the pending state, returning the previous value.
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error>;

    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>>;

    fn has(&self, height: Height, path: &Path) -> bool {
        self.get(height, path).is_some()
    }

    /// Removes `path` from the pending state, returning the removed value.
    fn delete(&mut self, path: &Path) -> Option<Vec<u8>>;

    /// Seals the pending state and returns its root hash.
    fn commit(&mut self) -> Result<Vec<u8>, Self::Error>;

    /// Accepts the writes made since the last `apply` or `reset`.
    fn apply(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Drops the writes made since the last `apply`.
    fn reset(&mut self) {}

    /// Number of committed heights.
    fn current_height(&self) -> RawHeight;

    /// Pending keys starting with `key_prefix`, in byte order.
    fn get_keys(&self, key_prefix: &Path) -> Vec<Path>;
}

pub trait ProvableStore: Store {
    /// Root hash of the pending state.
    fn root_hash(&self) -> Vec<u8>;

    /// An existence proof when `key` is set at `height`, a non-existence
    /// proof otherwise. `None` when the height is unknown or the state holds
    /// no key at all.
    fn get_proof(&self, height: Height, key: &Path) -> Option<CommitmentProof>;
}
