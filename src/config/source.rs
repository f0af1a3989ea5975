use tracing::{debug, error};

use super::properties::{self, Properties};
use super::ConfigError;

/// Logical name of the properties resource bundled with the crate.
pub const DEFAULT_RESOURCE: &str = "connection-prod.properties";

/// Resources embedded at compile time, looked up by logical name.
const BUNDLED: &[(&str, &str)] = &[(
    DEFAULT_RESOURCE,
    include_str!("../../resources/connection-prod.properties"),
)];

/// A source of properties in the loading pipeline.
///
/// Returns `Ok(None)` when an optional source is absent and should be skipped.
pub trait PropertySource: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Result<Option<Properties>, ConfigError>;
}

/// A properties resource embedded in the crate.
#[derive(Debug, Clone)]
pub struct BundledSource {
    name: String,
}

impl BundledSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PropertySource for BundledSource {
    fn load(&self) -> Result<Option<Properties>, ConfigError> {
        let Some((_, contents)) = BUNDLED.iter().find(|(name, _)| *name == self.name) else {
            error!(resource = %self.name, "properties resource not found, endpoint values must be overridden");
            return Err(ConfigError::ResourceNotFound(self.name.clone()));
        };

        let props = properties::parse(&self.name, contents)?;
        debug!(resource = %self.name, keys = props.len(), "bundled properties loaded");
        Ok(Some(props))
    }
}

/// Properties text supplied directly by the caller.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    contents: String,
}

impl InlineSource {
    /// `name` identifies the text in parse errors.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

impl PropertySource for InlineSource {
    fn load(&self) -> Result<Option<Properties>, ConfigError> {
        properties::parse(&self.name, &self.contents).map(Some)
    }
}
