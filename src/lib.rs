pub mod config;
pub mod connection;

pub use config::{ConfigError, EndpointOverrides, PropertiesLoader, DEFAULT_RESOURCE};
pub use connection::{ConnectionProperties, Endpoint, Endpoints};
