use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentRoot;
use ibc_core::host::types::error::DecodingError;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::proto::{Any, Protobuf};
use ibc_core::primitives::Timestamp;

use crate::testapp::ibc::clients::mock::proto::Header as RawMockHeader;
use crate::utils::year_2023;

pub const MOCK_HEADER_TYPE_URL: &str = "/ibc.mock.Header";

/// A block header of a mock chain: its height, time and the application
/// root committed at that height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHeader {
    pub height: Height,
    pub timestamp: Timestamp,
    pub root: CommitmentRoot,
}

impl Default for MockHeader {
    fn default() -> Self {
        Self::new(Height::min())
    }
}

impl Display for MockHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "MockHeader {{ height: {}, timestamp: {} }}",
            self.height, self.timestamp
        )
    }
}

impl MockHeader {
    /// A header with an empty root, good for clients that are never asked
    /// to verify a proof.
    pub fn new(height: Height) -> Self {
        Self {
            height,
            timestamp: year_2023(),
            root: CommitmentRoot::from(Vec::new()),
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn with_timestamp(self, timestamp: Timestamp) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_root(self, root: CommitmentRoot) -> Self {
        Self { root, ..self }
    }
}

impl Protobuf<RawMockHeader> for MockHeader {}

impl TryFrom<RawMockHeader> for MockHeader {
    type Error = ClientError;

    fn try_from(raw: RawMockHeader) -> Result<Self, Self::Error> {
        Ok(Self {
            height: raw
                .height
                .ok_or(DecodingError::missing_field("height"))?
                .try_into()?,
            timestamp: Timestamp::from_nanoseconds(raw.timestamp),
            root: CommitmentRoot::from(raw.root),
        })
    }
}

impl From<MockHeader> for RawMockHeader {
    fn from(value: MockHeader) -> Self {
        Self {
            height: Some(value.height.into()),
            timestamp: value.timestamp.nanoseconds(),
            root: value.root.into_vec(),
        }
    }
}

impl Protobuf<Any> for MockHeader {}

impl TryFrom<Any> for MockHeader {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            MOCK_HEADER_TYPE_URL => Protobuf::<RawMockHeader>::decode_vec(&raw.value).map_err(
                |e| {
                    DecodingError::FailedToDecodeProto {
                        description: e.to_string(),
                    }
                    .into()
                },
            ),
            _ => Err(ClientError::UnknownHeaderType(raw.type_url)),
        }
    }
}

impl From<MockHeader> for Any {
    fn from(header: MockHeader) -> Self {
        Self {
            type_url: MOCK_HEADER_TYPE_URL.to_string(),
            value: Protobuf::<RawMockHeader>::encode_vec(header),
        }
    }
}
