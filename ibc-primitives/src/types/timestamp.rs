//! Defines the representation of timestamps used in IBC.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::ops::{Add, Sub};
use core::str::FromStr;
use core::time::Duration;

use displaydoc::Display;
use ibc_proto::google::protobuf::Timestamp as RawTimestamp;
use ibc_proto::Protobuf;
use time::OffsetDateTime;

use crate::prelude::*;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// A block timestamp, kept as nanoseconds since the UNIX epoch.
///
/// The `u64` range covers dates up to the year 2554. An unset timestamp is
/// never represented by this type; callers use `Option<Timestamp>` (or a
/// dedicated enum such as a packet's timeout timestamp) instead of zero.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    pub const fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self { nanos: nanoseconds }
    }

    pub fn from_unix_timestamp(secs: u64, nanos: u32) -> Result<Self, TimestampError> {
        if u64::from(nanos) >= NANOS_PER_SECOND {
            return Err(TimestampError::DateOutOfRange);
        }

        secs.checked_mul(NANOS_PER_SECOND)
            .and_then(|n| n.checked_add(u64::from(nanos)))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::DateOutOfRange)
    }

    /// Returns a `Timestamp` representation of the current time.
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        Self::from_nanoseconds(u64::try_from(nanos).unwrap_or_default())
    }

    /// Computes the duration elapsed from `other` to `self`. Returns `None`
    /// when `other` is later than `self`.
    pub fn duration_since(&self, other: &Self) -> Option<Duration> {
        self.nanos.checked_sub(other.nanos).map(Duration::from_nanos)
    }

    pub fn nanoseconds(self) -> u64 {
        self.nanos
    }
}

impl Protobuf<RawTimestamp> for Timestamp {}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = TimestampError;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        let seconds = u64::try_from(raw.seconds).map_err(|_| TimestampError::DateOutOfRange)?;
        let nanos = u32::try_from(raw.nanos).map_err(|_| TimestampError::DateOutOfRange)?;
        Self::from_unix_timestamp(seconds, nanos)
    }
}

impl From<Timestamp> for RawTimestamp {
    fn from(value: Timestamp) -> Self {
        // both casts are lossless: seconds < 2^35 and nanos < 10^9
        RawTimestamp {
            seconds: (value.nanos / NANOS_PER_SECOND) as i64,
            nanos: (value.nanos % NANOS_PER_SECOND) as i32,
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_nanoseconds(u64::from_str(s)?))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.nanos)) {
            Ok(odt) => write!(f, "Timestamp({odt})"),
            Err(_) => write!(f, "Timestamp({}ns)", self.nanos),
        }
    }
}

impl Add<Duration> for Timestamp {
    type Output = Result<Self, TimestampError>;

    fn add(self, rhs: Duration) -> Self::Output {
        u64::try_from(rhs.as_nanos())
            .ok()
            .and_then(|d| self.nanos.checked_add(d))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::TimestampOverflow)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Result<Self, TimestampError>;

    fn sub(self, rhs: Duration) -> Self::Output {
        u64::try_from(rhs.as_nanos())
            .ok()
            .and_then(|d| self.nanos.checked_sub(d))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::DateOutOfRange)
    }
}

#[derive(Debug, Display, PartialEq, Eq, derive_more::From)]
pub enum TimestampError {
    /// parsing u64 integer from string error: `{0}`
    ParseInt(ParseIntError),
    /// date out of range
    DateOutOfRange,
    /// timestamp overflow when modifying with duration
    TimestampOverflow,
}

#[cfg(feature = "std")]
impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ParseInt(e) => Some(e),
            _ => None,
        }
    }
}
