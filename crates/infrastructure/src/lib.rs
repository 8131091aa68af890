//! Scholar Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestTransport;
pub use self::config::{ClientConfig, ConfigError, RetryMode};
pub use persistence::FileSessionRepository;
pub use serialization::{SerializationError, from_json_bytes, to_json_pretty, to_json_pretty_bytes};
