//! File-backed storage: a YAML config file and one JSON file per cached key,
//! all under a single data directory.

pub mod connection;
pub mod config_repository;
pub mod key_value_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::FileConnection;
pub use config_repository::ConfigRepository;
pub use key_value_repository::FileKeyValueRepository;
