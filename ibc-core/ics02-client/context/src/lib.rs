//! The interface between light clients and the host store: the traits a
//! client state implements and the contexts through which it reads and
//! writes its client and consensus states.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod client_state;
pub mod consensus_state;

mod context;
pub use context::*;

/// Trait preludes for the ICS-02 client implementation.
pub mod prelude {
    pub use crate::client_state::*;
    pub use crate::consensus_state::*;
    pub use crate::context::*;
}

pub mod types {
    #[doc(inline)]
    pub use ibc_core_client_types::*;
}
