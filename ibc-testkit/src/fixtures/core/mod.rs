pub mod channel;
pub mod client;
pub mod commitment;
pub mod connection;
pub mod context;
pub mod signer;
