use core::str::FromStr;

use derive_more::Into;
use ibc_primitives::prelude::*;

use crate::error::IdentifierError;
use crate::validate::{validate_client_identifier, validate_client_type};

/// Identifies a light client on the host chain.
///
/// Client identifiers are allocated by the host as `{client_type}-{counter}`.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into, derive_more::Display)]
pub struct ClientId(String);

impl ClientId {
    /// Builds a new client identifier from a client type and a counter.
    ///
    /// ```
    /// # use ibc_core_host_types::identifiers::ClientId;
    /// let client_id = ClientId::new("07-tendermint", 0).unwrap();
    /// assert_eq!(client_id.as_str(), "07-tendermint-0");
    /// ```
    pub fn new(client_type: &str, counter: u64) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type).map(|()| Self::format(client_type, counter))
    }

    pub(super) fn format(client_type: &str, counter: u64) -> Self {
        Self(format!("{client_type}-{counter}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for ClientId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl PartialEq<str> for ClientId {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq(other)
    }
}
