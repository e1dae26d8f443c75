use ics23::CommitmentProof;
use tracing::trace;

use crate::context::{ProvableStore, Store};
use crate::merkle::MerkleTree;
use crate::types::{Height, Path, RawHeight};

/// One Merkle tree snapshot per committed height, plus the pending tree.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    /// `store[h - 1]` is the state committed at height `h`
    store: Vec<MerkleTree>,
    pending: MerkleTree,
}

impl InMemoryStore {
    #[inline]
    fn get_state(&self, height: Height) -> Option<&MerkleTree> {
        match height {
            Height::Pending => Some(&self.pending),
            Height::Latest => self.store.last(),
            Height::Stable(0) => None,
            Height::Stable(h) => usize::try_from(h - 1)
                .ok()
                .and_then(|index| self.store.get(index)),
        }
    }
}

impl Store for InMemoryStore {
    type Error = core::convert::Infallible;

    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error> {
        trace!(%path, "set");
        Ok(self.pending.insert(path, value))
    }

    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        trace!(%path, %height, "get");
        self.get_state(height).and_then(|v| v.get(path).cloned())
    }

    fn delete(&mut self, path: &Path) -> Option<Vec<u8>> {
        trace!(%path, "delete");
        self.pending.remove(path)
    }

    fn commit(&mut self) -> Result<Vec<u8>, Self::Error> {
        trace!(height = self.store.len() + 1, "commit");
        self.store.push(self.pending.clone());
        Ok(self.root_hash())
    }

    fn current_height(&self) -> RawHeight {
        self.store.len() as RawHeight
    }

    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.pending.keys_with_prefix(key_prefix).cloned().collect()
    }
}

impl ProvableStore for InMemoryStore {
    fn root_hash(&self) -> Vec<u8> {
        self.pending.root_hash().to_vec()
    }

    fn get_proof(&self, height: Height, key: &Path) -> Option<CommitmentProof> {
        trace!(%key, %height, "get proof");
        self.get_state(height).and_then(|state| state.proof(key))
    }
}
