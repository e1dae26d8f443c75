//! Mock chains for exercising the IBC core end to end.
//!
//! A [`context::MockContext`] is a chain: a block-producing host whose
//! application hash commits to an IBC store, a router with the mock
//! application bound to the `mock` port, and the mock light client, whose
//! proofs are checked for real against the counterparty's block roots. The
//! [`relayer`] module drives two such chains through the handshakes and the
//! packet lifecycle.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_casts, trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod context;
pub mod fixtures;
pub mod hosts;
pub mod relayer;
pub mod testapp;
pub mod utils;
