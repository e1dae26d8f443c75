//! Processing logic for the client registry messages.

pub mod create_client;
pub mod update_client;
