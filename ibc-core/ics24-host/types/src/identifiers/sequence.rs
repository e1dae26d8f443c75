use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_primitives::prelude::*;

use crate::error::IdentifierError;

/// The sequence number of a packet enforces ordering among packets from the
/// same channel end. Counters start at 1; zero is never a valid packet
/// sequence.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(u64);

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn increment(&self) -> Sequence {
        Sequence(self.0.saturating_add(1))
    }

    /// Encodes the sequence as the 8-byte big-endian value stored under the
    /// `nextSequence*` keys.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    /// Decodes a stored big-endian counter. Returns `None` unless `bytes` is
    /// exactly 8 bytes long.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; 8] = bytes.try_into().ok()?;
        Some(Self(u64::from_be_bytes(raw)))
    }
}

impl FromStr for Sequence {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| IdentifierError::InvalidSequence {
                value: s.to_string(),
                description: e.to_string(),
            })
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Sequence(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(s: Sequence) -> u64 {
        s.0
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}
