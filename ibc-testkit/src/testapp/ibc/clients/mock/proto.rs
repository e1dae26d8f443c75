//! Wire types of the mock light client.
//!
//! They mirror `ibc.mock.*` but carry the commitment root of the header, so
//! the mock client can verify real proofs.

use ibc_proto::ibc::core::client::v1::Height as RawHeight;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Header {
    #[prost(message, optional, tag = "1")]
    pub height: Option<RawHeight>,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    #[prost(bytes = "vec", tag = "3")]
    pub root: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClientState {
    #[prost(message, optional, tag = "1")]
    pub header: Option<Header>,
    /// nanoseconds
    #[prost(uint64, tag = "2")]
    pub trusting_period: u64,
    #[prost(bool, tag = "3")]
    pub frozen: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ConsensusState {
    #[prost(message, optional, tag = "1")]
    pub header: Option<Header>,
}
