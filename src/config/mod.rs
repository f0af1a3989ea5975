//! Properties loading: parsing, sources, and the layered loader.

mod builder;
mod error;
mod file;
mod overrides;
mod properties;
mod source;

pub use builder::PropertiesLoader;
pub use error::ConfigError;
pub use file::FileSource;
pub use overrides::{EndpointOverrides, OverrideSource};
pub use properties::{parse, Properties};
pub use source::{BundledSource, InlineSource, PropertySource, DEFAULT_RESOURCE};
