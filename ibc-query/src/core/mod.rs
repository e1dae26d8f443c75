//! Query functions for the client, connection and channel layers, and the
//! context a host implements to serve them.

pub mod context;
pub mod pagination;

pub mod client {
    mod query;
    pub use query::*;
}

pub mod connection {
    mod query;
    pub use query::*;
}

pub mod channel {
    mod query;
    pub use query::*;
}

pub(crate) mod proof;
