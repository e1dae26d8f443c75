//! Acknowledgement bytes written by the receiving application.

use derive_more::{From, Into};
use ibc_primitives::prelude::*;

/// Opaque to the core. An empty acknowledgement is accepted only on ordered
/// channels, where it means that nothing is written.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, From, Into)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}
