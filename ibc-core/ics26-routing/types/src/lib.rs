//! Domain types shared by the router and the application modules bound to
//! ports.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod event;
pub mod module;
