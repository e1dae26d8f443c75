//! A sorted binary Merkle tree over the store's key-value pairs.
//!
//! Leaves are the pairs in key byte order. A range of `n > 1` leaves splits
//! after the largest power of two below `n`. Leaf and inner hashing follow
//! `ics23::tendermint_spec`:
//!
//! - leaf: `sha256(0x00 || varint(len(key)) || key || varint(32) || sha256(value))`
//! - inner: `sha256(0x01 || left || right)`
//!
//! An empty tree hashes to `sha256("")`.

mod proof;
mod tree;


pub use proof::{proof_spec, verify_membership, verify_non_membership};
pub use tree::{Hash, MerkleTree};
