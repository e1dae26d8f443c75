//! Packet, acknowledgement and receipt commitments.

use ibc_primitives::prelude::*;

use crate::acknowledgement::Acknowledgement;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// The 32-byte commitment stored under
/// `ports/{port}/channels/{channel}/packets/{seq}` on the sending chain.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PacketCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// `SHA256(ack)`, stored under
/// `ports/{port}/channels/{channel}/acknowledgements/{seq}` on the receiving
/// chain.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcknowledgementCommitment(Vec<u8>);

impl AcknowledgementCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for AcknowledgementCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for AcknowledgementCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Whether an unordered packet was received; only `Ok` is ever stored.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receipt {
    Ok,
    None,
}

impl Receipt {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The stored marker value.
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Ok => &[1],
            Self::None => &[],
        }
    }
}

/// `SHA256(be_u64(timeout_timestamp) || be_u64(timeout_height) || SHA256(data))`,
/// with `0` standing for an unset timeout.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &TimeoutHeight,
    timeout_timestamp: &TimeoutTimestamp,
) -> PacketCommitment {
    let mut hash_input = [0; 8 * 2 + 32];

    hash_input[..8].copy_from_slice(&timeout_timestamp.nanoseconds().to_be_bytes());
    hash_input[8..16].copy_from_slice(&timeout_height.commitment_value().to_be_bytes());
    hash_input[16..].copy_from_slice(&hash(packet_data));

    hash(&hash_input).to_vec().into()
}

pub fn compute_ack_commitment(ack: &Acknowledgement) -> AcknowledgementCommitment {
    hash(ack.as_ref()).to_vec().into()
}

/// Proofs of the provable store are built over SHA256 as well.
fn hash(data: &[u8]) -> [u8; 32] {
    use sha2::Digest;

    sha2::Sha256::digest(data).into()
}
