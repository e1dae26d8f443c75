//! The IBC core in one dependency: connection and channel handshakes, the
//! packet lifecycle, the host context traits and the handler entry points.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

/// Re-exports IBC handler entrypoints from the `ibc-core-handler` crate for
/// added convenience.
pub mod entrypoint {
    #[doc(inline)]
    pub use ibc_core_handler::entrypoint::*;
}

pub mod primitives {
    #[doc(inline)]
    pub use ibc_primitives::*;
}

/// ICS-02: client handlers and the light client traits.
pub mod client {
    #[doc(inline)]
    pub use ibc_core_client::*;
}

/// ICS-03: the connection handshake.
pub mod connection {
    #[doc(inline)]
    pub use ibc_core_connection::*;
}

/// ICS-04: the channel handshake and packets.
pub mod channel {
    #[doc(inline)]
    pub use ibc_core_channel::*;
}

pub mod commitment_types {
    #[doc(inline)]
    pub use ibc_core_commitment_types::*;
}

/// ICS-24: host context traits, identifiers and store paths.
pub mod host {
    #[doc(inline)]
    pub use ibc_core_host::*;
}

pub mod handler {
    #[doc(inline)]
    pub use ibc_core_handler::*;
}

/// ICS-26: ports, modules and the router.
pub mod router {
    #[doc(inline)]
    pub use ibc_core_router::*;
}
