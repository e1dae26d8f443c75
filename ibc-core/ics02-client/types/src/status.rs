use core::fmt::{Display, Formatter};

use crate::error::ClientError;

/// Represents the status of a client
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The client is active and allowed to be used
    Active,
    /// The client is frozen and not allowed to be used
    Frozen,
    /// The client is expired and not allowed to be used
    Expired,
}

impl Status {
    pub fn is_active(&self) -> bool {
        *self == Status::Active
    }

    pub fn is_frozen(&self) -> bool {
        *self == Status::Frozen
    }

    pub fn is_expired(&self) -> bool {
        *self == Status::Expired
    }

    /// Checks whether the status is active; returns `Err` if not.
    pub fn verify_is_active(&self) -> Result<(), ClientError> {
        match self {
            Self::Active => Ok(()),
            &status => Err(ClientError::InactiveClient { status }),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Frozen => write!(f, "FROZEN"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}
