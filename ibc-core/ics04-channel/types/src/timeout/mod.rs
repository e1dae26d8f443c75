//! Packet timeouts, expressed in terms of the destination chain.
//!
//! A packet carries a timeout height and a timeout timestamp; either may be
//! left unset, but not both. A timeout is reached once the destination chain
//! is at (or past) the given height or time.

mod height;
mod timestamp;

pub use height::*;
pub use timestamp::*;
