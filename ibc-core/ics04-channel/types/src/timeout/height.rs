use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_core_client_types::Height;
use ibc_core_host_types::error::DecodingError;
use ibc_primitives::prelude::*;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;

/// The destination height at which a packet stops being deliverable.
///
/// On the wire an unset timeout height is the zero height.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeoutHeight {
    Never,
    At(Height),
}

impl TimeoutHeight {
    pub fn no_timeout() -> Self {
        Self::Never
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// The value hashed into the packet commitment, `0` when unset.
    pub fn commitment_value(&self) -> u64 {
        match self {
            Self::At(height) => height.value(),
            Self::Never => 0,
        }
    }

    /// Whether a chain at `height` has reached the timeout.
    pub fn has_expired(&self, height: Height) -> bool {
        match self {
            Self::At(timeout_height) => height >= *timeout_height,
            Self::Never => false,
        }
    }
}

impl From<Height> for TimeoutHeight {
    fn from(height: Height) -> Self {
        Self::At(height)
    }
}

impl TryFrom<RawHeight> for TimeoutHeight {
    type Error = DecodingError;

    fn try_from(raw_height: RawHeight) -> Result<Self, Self::Error> {
        if raw_height.revision_number == 0 && raw_height.revision_height == 0 {
            return Ok(Self::Never);
        }

        Height::try_from(raw_height)
            .map(Self::At)
            .map_err(|e| DecodingError::invalid_field(format!("timeout height: {e}")))
    }
}

impl TryFrom<Option<RawHeight>> for TimeoutHeight {
    type Error = DecodingError;

    fn try_from(raw_height: Option<RawHeight>) -> Result<Self, Self::Error> {
        match raw_height {
            Some(raw_height) => Self::try_from(raw_height),
            None => Ok(Self::Never),
        }
    }
}

impl From<TimeoutHeight> for Option<RawHeight> {
    fn from(timeout_height: TimeoutHeight) -> Self {
        let raw_height = match timeout_height {
            TimeoutHeight::At(height) => height.into(),
            TimeoutHeight::Never => RawHeight {
                revision_number: 0,
                revision_height: 0,
            },
        };
        Some(raw_height)
    }
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(height) => write!(f, "{height}"),
            Self::Never => write!(f, "no timeout height"),
        }
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::{Deserialize, Serialize};

    use super::*;

    impl Serialize for TimeoutHeight {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            self.commitment_value().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for TimeoutHeight {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            match u64::deserialize(deserializer)? {
                0 => Ok(TimeoutHeight::Never),
                height => Height::new(height)
                    .map(TimeoutHeight::At)
                    .map_err(serde::de::Error::custom),
            }
        }
    }
}
