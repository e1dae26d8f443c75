pub mod create_client;
pub mod update_client;
