pub mod applications;
pub mod clients;
pub mod core;
