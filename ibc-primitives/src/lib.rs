//! Contains primitives types and traits common to various IBC components.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod prelude;
pub mod utils;

mod traits;
pub use traits::*;

mod types;
pub use types::*;

/// Re-exports necessary google proto types and `Protobuf` trait from the
/// `ibc-proto-rs` crate.
pub mod proto {
    pub use ibc_proto::google::protobuf::{Any, Timestamp};
    pub use ibc_proto::Protobuf;
}
