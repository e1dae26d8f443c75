use std::sync::Arc;

use ics23::CommitmentProof;
use parking_lot::RwLock;

use crate::context::{ProvableStore, Store};
use crate::types::{Height, Path, RawHeight};
use crate::utils::SharedRw;

/// Clones share the same underlying store.
#[derive(Clone, Debug)]
pub struct SharedStore<S>(SharedRw<S>);

impl<S> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    pub fn share(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S> Default for SharedStore<S>
where
    S: Default + Store,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store for SharedStore<S>
where
    S: Store,
{
    type Error = S::Error;

    #[inline]
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error> {
        self.0.write().set(path, value)
    }

    #[inline]
    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        self.0.read().get(height, path)
    }

    #[inline]
    fn delete(&mut self, path: &Path) -> Option<Vec<u8>> {
        self.0.write().delete(path)
    }

    #[inline]
    fn commit(&mut self) -> Result<Vec<u8>, Self::Error> {
        self.0.write().commit()
    }

    #[inline]
    fn apply(&mut self) -> Result<(), Self::Error> {
        self.0.write().apply()
    }

    #[inline]
    fn reset(&mut self) {
        self.0.write().reset()
    }

    #[inline]
    fn current_height(&self) -> RawHeight {
        self.0.read().current_height()
    }

    #[inline]
    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.0.read().get_keys(key_prefix)
    }
}

impl<S> ProvableStore for SharedStore<S>
where
    S: ProvableStore,
{
    #[inline]
    fn root_hash(&self) -> Vec<u8> {
        self.0.read().root_hash()
    }

    #[inline]
    fn get_proof(&self, height: Height, key: &Path) -> Option<CommitmentProof> {
        self.0.read().get_proof(height, key)
    }
}
