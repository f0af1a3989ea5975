use std::path::Path;

use tracing::{debug, error};

use super::file::FileSource;
use super::overrides::{EndpointOverrides, OverrideSource};
use super::properties::Properties;
use super::source::{BundledSource, InlineSource, PropertySource};
use super::ConfigError;
use crate::connection::{ConnectionProperties, Endpoint};

/// Builder for loading connection properties from layered sources.
///
/// Sources are merged in registration order, with later sources overriding
/// keys from earlier ones. After merging, the five endpoint keys of the
/// default namespace must all be present; the sandbox namespace is only
/// checked when [`strict_sandbox`](Self::strict_sandbox) is enabled.
///
/// ## Example
///
/// ```no_run
/// use paypal_access_config::{ConnectionProperties, DEFAULT_RESOURCE};
///
/// let props = ConnectionProperties::builder()
///     .with_bundled(DEFAULT_RESOURCE)
///     .with_file("config/connection.properties", false)
///     .with_overrides_file("config/endpoints.toml", false)
///     .build()?;
///
/// println!("{:?}", props.token_endpoint());
/// # Ok::<(), paypal_access_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct PropertiesLoader {
    sources: Vec<Box<dyn PropertySource>>,
    strict_sandbox: bool,
}

impl PropertiesLoader {
    /// Creates a loader with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource bundled with the crate, looked up by logical name.
    pub fn with_bundled(self, name: impl Into<String>) -> Self {
        self.with_source(BundledSource::new(name))
    }

    /// Adds properties text held in memory. `name` appears in parse errors.
    pub fn with_inline(self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.with_source(InlineSource::new(name, contents))
    }

    /// Adds a properties file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds a TOML file of endpoint overrides.
    pub fn with_overrides_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(OverrideSource::file(path, required))
    }

    /// Adds endpoint overrides held in memory.
    pub fn with_overrides(self, overrides: EndpointOverrides) -> Self {
        self.with_source(OverrideSource::values(overrides))
    }

    /// Adds a custom source.
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Also require every `sandbox.`-prefixed endpoint key at build time.
    ///
    /// Off by default, in which case a missing sandbox key only shows up as
    /// `None` from a getter after [`init_sandbox`](ConnectionProperties::init_sandbox).
    pub fn strict_sandbox(mut self, strict: bool) -> Self {
        self.strict_sandbox = strict;
        self
    }

    /// Loads and merges every source, then validates the required keys.
    pub fn build(self) -> Result<ConnectionProperties, ConfigError> {
        let mut merged = Properties::new();

        for source in &self.sources {
            if let Some(props) = source.load()? {
                merged.extend(props);
            }
        }

        require_endpoints(&merged, Endpoint::key)?;
        if self.strict_sandbox {
            require_endpoints(&merged, Endpoint::sandbox_key)?;
        }

        debug!(
            sources = self.sources.len(),
            keys = merged.len(),
            "connection properties loaded"
        );
        Ok(ConnectionProperties::from_properties(merged))
    }
}

fn require_endpoints(
    props: &Properties,
    key_of: fn(Endpoint) -> &'static str,
) -> Result<(), ConfigError> {
    for endpoint in Endpoint::ALL {
        let key = key_of(endpoint);
        if !props.contains_key(key) {
            error!(key, "required connection property missing");
            return Err(ConfigError::MissingKey {
                key: key.to_string(),
                description: endpoint.description(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Endpoints;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COMPLETE: &str = "\
authorizeEndpoint=https://idp.example/authorize
tokenEndpoint=https://idp.example/token
checkidEndpoint=https://idp.example/checkid
userinfoEndpoint=https://idp.example/userinfo
disconnectEndpoint=https://idp.example/endsession
";

    fn without(key: &str) -> String {
        COMPLETE
            .lines()
            .filter(|line| !line.starts_with(key))
            .map(|line| format!("{line}\n"))
            .collect()
    }

    #[test]
    fn test_each_missing_key_is_fatal() {
        for endpoint in Endpoint::ALL {
            let result = PropertiesLoader::new()
                .with_inline("partial", without(endpoint.key()))
                .build();

            match result {
                Err(ConfigError::MissingKey { key, description }) => {
                    assert_eq!(key, endpoint.key());
                    assert_eq!(description, endpoint.description());
                }
                other => panic!("expected missing {endpoint}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let contents = format!("{}authorizeEndpoint=\n", without("authorizeEndpoint"));
        let props = PropertiesLoader::new()
            .with_inline("empty", contents)
            .build()
            .unwrap();

        assert_eq!(props.authorize_endpoint(), Some(""));
    }

    #[test]
    fn test_no_sources_fails() {
        let result = PropertiesLoader::new().build();
        assert!(matches!(result, Err(ConfigError::MissingKey { .. })));
    }

    #[test]
    fn test_missing_bundled_resource_is_distinct() {
        let result = PropertiesLoader::new()
            .with_bundled("nonexistent.properties")
            .build();

        assert!(matches!(result, Err(ConfigError::ResourceNotFound(_))));
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tokenEndpoint=https://file.example/token").unwrap();

        let props = PropertiesLoader::new()
            .with_inline("base", COMPLETE)
            .with_file(file.path(), true)
            .with_overrides(EndpointOverrides {
                production: Endpoints::default().with(Endpoint::UserInfo, "https://mem/userinfo"),
                sandbox: None,
            })
            .build()
            .unwrap();

        assert_eq!(props.token_endpoint(), Some("https://file.example/token"));
        assert_eq!(props.user_info_endpoint(), Some("https://mem/userinfo"));
        assert_eq!(
            props.authorize_endpoint(),
            Some("https://idp.example/authorize")
        );
    }

    #[test]
    fn test_overrides_can_complete_missing_keys() {
        let props = PropertiesLoader::new()
            .with_inline("partial", without("checkidEndpoint"))
            .with_overrides(EndpointOverrides {
                production: Endpoints::default().with(Endpoint::CheckId, "https://o/checkid"),
                sandbox: None,
            })
            .build()
            .unwrap();

        assert_eq!(props.check_id_endpoint(), Some("https://o/checkid"));
    }

    #[test]
    fn test_sandbox_keys_not_required_by_default() {
        let props = PropertiesLoader::new()
            .with_inline("prod-only", COMPLETE)
            .build()
            .unwrap();

        props.init_sandbox();
        assert_eq!(props.authorize_endpoint(), None);
    }

    #[test]
    fn test_strict_sandbox_requires_sandbox_keys() {
        let contents = format!("{COMPLETE}sandbox.authorizeEndpoint=https://sb/authorize\n");
        let result = PropertiesLoader::new()
            .with_inline("partial-sandbox", contents)
            .strict_sandbox(true)
            .build();

        match result {
            Err(ConfigError::MissingKey { key, .. }) => {
                assert_eq!(key, "sandbox.tokenEndpoint");
            }
            other => panic!("expected missing sandbox key, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_sandbox_accepts_bundled_resource() {
        let props = PropertiesLoader::new()
            .with_bundled(crate::DEFAULT_RESOURCE)
            .strict_sandbox(true)
            .build()
            .unwrap();

        assert!(props.endpoints().is_complete());
    }
}
