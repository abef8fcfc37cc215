pub mod error;
pub mod resolve;
pub mod stance;
pub mod store;
pub mod types;
