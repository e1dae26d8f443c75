use crate::context::Store;
use crate::types::{Height, Path, RawHeight};

/// Confines a store handle to the keys under `prefix/`. Applications use it
/// to keep their state apart from each other in the host's main store.
#[derive(Clone, Debug)]
pub struct PrefixedStore<S> {
    store: S,
    prefix: Path,
}

impl<S> PrefixedStore<S> {
    pub fn new(store: S, prefix: Path) -> Self {
        Self { store, prefix }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }
}

impl<S> Store for PrefixedStore<S>
where
    S: Store,
{
    type Error = S::Error;

    #[inline]
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error> {
        self.store.set(path.prefixed(&self.prefix), value)
    }

    #[inline]
    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        self.store.get(height, &path.prefixed(&self.prefix))
    }

    #[inline]
    fn delete(&mut self, path: &Path) -> Option<Vec<u8>> {
        self.store.delete(&path.prefixed(&self.prefix))
    }

    #[inline]
    fn commit(&mut self) -> Result<Vec<u8>, Self::Error> {
        self.store.commit()
    }

    #[inline]
    fn apply(&mut self) -> Result<(), Self::Error> {
        self.store.apply()
    }

    #[inline]
    fn reset(&mut self) {
        self.store.reset()
    }

    #[inline]
    fn current_height(&self) -> RawHeight {
        self.store.current_height()
    }

    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.store
            .get_keys(&key_prefix.prefixed(&self.prefix))
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.prefix))
            .collect()
    }
}
