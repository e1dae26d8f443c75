use ics23::CommitmentProof;
use tracing::{error, trace};

use crate::context::{ProvableStore, Store};
use crate::types::{Height, Path, RawHeight};

/// Records an undo log of the writes made since the last `apply`, so that
/// `reset` can roll them back.
#[derive(Clone, Debug)]
pub struct RevertibleStore<S> {
    store: S,
    /// undo operations, newest last
    op_log: Vec<RevertOp>,
}

#[derive(Clone, Debug)]
enum RevertOp {
    Delete(Path),
    Set(Path, Vec<u8>),
}

impl RevertOp {
    fn undoing(path: Path, previous: Option<Vec<u8>>) -> Self {
        match previous {
            None => RevertOp::Delete(path),
            Some(value) => RevertOp::Set(path, value),
        }
    }
}

impl<S> RevertibleStore<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            op_log: vec![],
        }
    }
}

impl<S> Default for RevertibleStore<S>
where
    S: Default + Store,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store for RevertibleStore<S>
where
    S: Store,
{
    type Error = S::Error;

    #[inline]
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error> {
        let previous = self.store.set(path.clone(), value)?;
        self.op_log.push(RevertOp::undoing(path, previous.clone()));
        Ok(previous)
    }

    #[inline]
    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        self.store.get(height, path)
    }

    #[inline]
    fn delete(&mut self, path: &Path) -> Option<Vec<u8>> {
        let previous = self.store.delete(path);
        if let Some(value) = &previous {
            self.op_log.push(RevertOp::Set(path.clone(), value.clone()));
        }
        previous
    }

    #[inline]
    fn commit(&mut self) -> Result<Vec<u8>, Self::Error> {
        self.apply()?;
        self.store.commit()
    }

    /// Does not forward to the inner store, so wrappers can be layered.
    #[inline]
    fn apply(&mut self) -> Result<(), Self::Error> {
        self.op_log.clear();
        Ok(())
    }

    /// Undoes directly on the inner store, which leaves the log untouched.
    #[inline]
    fn reset(&mut self) {
        trace!(ops = self.op_log.len(), "rolling back");
        while let Some(op) = self.op_log.pop() {
            match op {
                RevertOp::Delete(path) => {
                    self.store.delete(&path);
                }
                RevertOp::Set(path, value) => {
                    if let Err(e) = self.store.set(path.clone(), value) {
                        error!(%path, error = ?e, "failed to restore value on rollback");
                    }
                }
            }
        }
    }

    #[inline]
    fn current_height(&self) -> RawHeight {
        self.store.current_height()
    }

    #[inline]
    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.store.get_keys(key_prefix)
    }
}

impl<S> ProvableStore for RevertibleStore<S>
where
    S: ProvableStore,
{
    #[inline]
    fn root_hash(&self) -> Vec<u8> {
        self.store.root_hash()
    }

    #[inline]
    fn get_proof(&self, height: Height, key: &Path) -> Option<CommitmentProof> {
        self.store.get_proof(height, key)
    }
}
