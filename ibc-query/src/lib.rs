//! Read-side queries for hosts running the IBC core.
//!
//! A host that implements [`QueryContext`](crate::core::context::QueryContext)
//! on top of its `ValidationContext` gets the functions in
//! [`core::client`], [`core::connection`] and [`core::channel`], which take
//! the `ibc-proto` query requests and answer with the matching responses.
//! Single-entry responses carry a proof of the returned value (or of its
//! absence) under the host's commitment root, together with the height the
//! proof was taken at, so a relayer can forward them as handshake and packet
//! proofs.
//!
//! The packet commitment and acknowledgement listings are paginated by
//! offset and limit (see [`core::pagination`]); the other list queries
//! return every entry and leave the `pagination` field of the response
//! empty.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod core;
pub mod error;
