//! A versioned key-value store with ICS-23 proofs.
//!
//! [`InMemoryStore`](impls::InMemoryStore) keeps one snapshot per committed
//! height plus a pending state. The wrappers in [`impls`] add write rollback,
//! sharing between handles and key namespacing. [`TypedStore`](types::TypedStore)
//! puts a codec in front of any [`Store`](context::Store).
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod context;
pub mod impls;
pub mod merkle;
pub mod types;
pub mod utils;
