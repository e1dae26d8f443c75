use std::collections::BTreeMap;

use ics23::commitment_proof::Proof;
use ics23::{
    CommitmentProof, ExistenceProof, HashOp, InnerOp, LeafOp, LengthOp, NonExistenceProof,
};
use prost::encoding::encode_varint;
use sha2::{Digest, Sha256};

use crate::types::Path;

pub type Hash = [u8; 32];

const LEAF_PREFIX: u8 = 0x00;
const INNER_PREFIX: u8 = 0x01;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MerkleTree {
    entries: BTreeMap<Path, Vec<u8>>,
}

impl MerkleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Path, value: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &Path) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &Path) -> Option<&Vec<u8>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys starting with `prefix`, in order.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a Path) -> impl Iterator<Item = &'a Path> {
        self.entries
            .range(prefix.clone()..)
            .map(|(key, _)| key)
            .take_while(move |key| key.starts_with(prefix))
    }

    pub fn root_hash(&self) -> Hash {
        subtree_root(&self.leaf_hashes())
    }

    /// An existence proof for a present key, a non-existence proof made of
    /// the key's neighbours otherwise. `None` only for an empty tree.
    pub fn proof(&self, key: &Path) -> Option<CommitmentProof> {
        if self.entries.is_empty() {
            return None;
        }
        let leaves = self.leaf_hashes();
        // number of keys strictly smaller than `key`
        let position = self.entries.range(..key.clone()).count();

        let proof = if self.entries.contains_key(key) {
            Proof::Exist(self.existence_proof(&leaves, position)?)
        } else {
            let left = position
                .checked_sub(1)
                .and_then(|index| self.existence_proof(&leaves, index));
            let right = self.existence_proof(&leaves, position);
            Proof::Nonexist(NonExistenceProof {
                key: key.as_bytes().to_vec(),
                left,
                right,
            })
        };

        Some(CommitmentProof { proof: Some(proof) })
    }

    fn existence_proof(&self, leaves: &[Hash], index: usize) -> Option<ExistenceProof> {
        let (key, value) = self.entries.iter().nth(index)?;
        Some(ExistenceProof {
            key: key.as_bytes().to_vec(),
            value: value.clone(),
            leaf: Some(leaf_op()),
            path: inner_path(leaves, index),
        })
    }

    fn leaf_hashes(&self) -> Vec<Hash> {
        self.entries
            .iter()
            .map(|(key, value)| leaf_hash(key.as_bytes(), value))
            .collect()
    }
}

fn leaf_op() -> LeafOp {
    LeafOp {
        hash: HashOp::Sha256.into(),
        prehash_key: HashOp::NoHash.into(),
        prehash_value: HashOp::Sha256.into(),
        length: LengthOp::VarProto.into(),
        prefix: vec![LEAF_PREFIX],
    }
}

pub(super) fn leaf_hash(key: &[u8], value: &[u8]) -> Hash {
    let mut buf = vec![LEAF_PREFIX];
    encode_varint(key.len() as u64, &mut buf);
    buf.extend_from_slice(key);
    let value_hash = Sha256::digest(value);
    encode_varint(value_hash.len() as u64, &mut buf);
    buf.extend_from_slice(&value_hash);
    Sha256::digest(&buf).into()
}

fn inner_hash(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([INNER_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Largest power of two strictly below `n`, for `n > 1`.
fn split_point(n: usize) -> usize {
    let mut k = 1;
    while k * 2 < n {
        k *= 2;
    }
    k
}

fn subtree_root(leaves: &[Hash]) -> Hash {
    match leaves {
        [] => Sha256::digest(b"").into(),
        [leaf] => *leaf,
        _ => {
            let k = split_point(leaves.len());
            inner_hash(&subtree_root(&leaves[..k]), &subtree_root(&leaves[k..]))
        }
    }
}

/// Inner steps from leaf `index` up to the root.
fn inner_path(leaves: &[Hash], index: usize) -> Vec<InnerOp> {
    if leaves.len() <= 1 {
        return Vec::new();
    }
    let k = split_point(leaves.len());
    if index < k {
        let mut ops = inner_path(&leaves[..k], index);
        ops.push(InnerOp {
            hash: HashOp::Sha256.into(),
            prefix: vec![INNER_PREFIX],
            suffix: subtree_root(&leaves[k..]).to_vec(),
        });
        ops
    } else {
        let mut ops = inner_path(&leaves[k..], index - k);
        let mut prefix = vec![INNER_PREFIX];
        prefix.extend_from_slice(&subtree_root(&leaves[..k]));
        ops.push(InnerOp {
            hash: HashOp::Sha256.into(),
            prefix,
            suffix: Vec::new(),
        });
        ops
    }
}
