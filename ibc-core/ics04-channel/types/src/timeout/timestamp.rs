use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_primitives::prelude::*;
use ibc_primitives::Timestamp;

/// The destination time after which a packet stops being deliverable.
///
/// The protocol encodes timestamps as nanoseconds since the UNIX epoch, with
/// `0` meaning that no timeout timestamp is set.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TimeoutTimestamp {
    Never,
    At(Timestamp),
}

impl TimeoutTimestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Self {
        match nanoseconds {
            0 => Self::Never,
            nanos => Self::At(Timestamp::from_nanoseconds(nanos)),
        }
    }

    /// Nanoseconds since the epoch, `0` when unset.
    pub fn nanoseconds(&self) -> u64 {
        match self {
            Self::At(timestamp) => timestamp.nanoseconds(),
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Whether a chain whose latest block carries `timestamp` has reached
    /// the timeout.
    pub fn has_expired(&self, timestamp: &Timestamp) -> bool {
        match self {
            Self::At(timeout_timestamp) => timestamp >= timeout_timestamp,
            Self::Never => false,
        }
    }
}

impl From<u64> for TimeoutTimestamp {
    fn from(nanoseconds: u64) -> Self {
        Self::from_nanoseconds(nanoseconds)
    }
}

impl From<Timestamp> for TimeoutTimestamp {
    fn from(timestamp: Timestamp) -> Self {
        Self::from_nanoseconds(timestamp.nanoseconds())
    }
}

impl Display for TimeoutTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(timeout_timestamp) => write!(f, "{timeout_timestamp}"),
            Self::Never => write!(f, "no timeout timestamp"),
        }
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::{Deserialize, Serialize};

    use super::TimeoutTimestamp;

    impl Serialize for TimeoutTimestamp {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            self.nanoseconds().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for TimeoutTimestamp {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            u64::deserialize(deserializer).map(TimeoutTimestamp::from_nanoseconds)
        }
    }
}
