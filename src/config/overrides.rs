//! Endpoint overrides supplied as TOML or in memory.
//!
//! Top-level keys override the default namespace and a `[sandbox]` table
//! overrides the sandbox namespace:
//!
//! ```toml
//! authorizeEndpoint = "https://idp.example/authorize"
//!
//! [sandbox]
//! tokenEndpoint = "https://sandbox.idp.example/token"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::file::read_optional;
use super::properties::Properties;
use super::source::PropertySource;
use super::ConfigError;
use crate::connection::Endpoints;

/// Endpoint values layered over the loaded properties.
///
/// Unknown keys and tables are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OverrideFile", into = "OverrideFile")]
pub struct EndpointOverrides {
    pub production: Endpoints,
    pub sandbox: Option<Endpoints>,
}

/// On-disk layout: production keys at top level, sandbox keys in `[sandbox]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    #[serde(rename = "authorizeEndpoint", skip_serializing_if = "Option::is_none")]
    authorize: Option<String>,
    #[serde(rename = "tokenEndpoint", skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(rename = "checkidEndpoint", skip_serializing_if = "Option::is_none")]
    check_id: Option<String>,
    #[serde(rename = "userinfoEndpoint", skip_serializing_if = "Option::is_none")]
    user_info: Option<String>,
    #[serde(rename = "disconnectEndpoint", skip_serializing_if = "Option::is_none")]
    disconnect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sandbox: Option<Endpoints>,
}

impl From<OverrideFile> for EndpointOverrides {
    fn from(file: OverrideFile) -> Self {
        Self {
            production: Endpoints {
                authorize: file.authorize,
                token: file.token,
                check_id: file.check_id,
                user_info: file.user_info,
                disconnect: file.disconnect,
            },
            sandbox: file.sandbox,
        }
    }
}

impl From<EndpointOverrides> for OverrideFile {
    fn from(overrides: EndpointOverrides) -> Self {
        let Endpoints {
            authorize,
            token,
            check_id,
            user_info,
            disconnect,
        } = overrides.production;
        Self {
            authorize,
            token,
            check_id,
            user_info,
            disconnect,
            sandbox: overrides.sandbox,
        }
    }
}

impl EndpointOverrides {
    /// Flattens into default and `sandbox.`-prefixed property keys.
    pub fn into_properties(self) -> Properties {
        let mut props: Properties = self
            .production
            .into_entries()
            .map(|(endpoint, value)| (endpoint.key().to_string(), value))
            .collect();

        if let Some(sandbox) = self.sandbox {
            props.extend(
                sandbox
                    .into_entries()
                    .map(|(endpoint, value)| (endpoint.sandbox_key().to_string(), value)),
            );
        }

        props
    }
}

#[derive(Debug, Clone)]
enum Origin {
    File { path: PathBuf, required: bool },
    Values(EndpointOverrides),
}

/// A source of endpoint overrides.
#[derive(Debug, Clone)]
pub struct OverrideSource {
    origin: Origin,
}

impl OverrideSource {
    /// Overrides read from a TOML file.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn file(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            origin: Origin::File {
                path: path.as_ref().to_path_buf(),
                required,
            },
        }
    }

    pub fn values(overrides: EndpointOverrides) -> Self {
        Self {
            origin: Origin::Values(overrides),
        }
    }
}

impl PropertySource for OverrideSource {
    fn load(&self) -> Result<Option<Properties>, ConfigError> {
        let overrides = match &self.origin {
            Origin::Values(overrides) => overrides.clone(),
            Origin::File { path, required } => {
                let Some(contents) = read_optional(path, *required)? else {
                    return Ok(None);
                };
                let overrides = toml::from_str(&contents).map_err(|e| {
                    ConfigError::OverrideParseError {
                        path: path.clone(),
                        source: e,
                    }
                })?;
                debug!(path = %path.display(), "endpoint overrides loaded");
                overrides
            }
        };

        Ok(Some(overrides.into_properties()))
    }
}
