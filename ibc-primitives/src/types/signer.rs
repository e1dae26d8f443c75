use derive_more::Display;

use crate::prelude::*;

/// Represents the address of the account that submitted the current message.
///
/// The core never interprets the address; hosts authorize it through
/// `ValidationContext::validate_message_signer`.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Signer(String);

impl Signer {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn new_empty() -> Self {
        Self::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for Signer {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Signer {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
