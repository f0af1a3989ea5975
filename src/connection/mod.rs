//! PayPal Access endpoint configuration.

mod endpoint;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::config::{ConfigError, Properties, PropertiesLoader, DEFAULT_RESOURCE};

pub use endpoint::{Endpoint, Endpoints, SANDBOX_PREFIX};

/// Endpoint URIs for connecting to PayPal Access.
///
/// Built once at startup, either with [`load`](Self::load) for the bundled
/// defaults or through [`builder`](Self::builder). The loaded map never
/// changes afterwards. The only mutation is [`init_sandbox`](Self::init_sandbox),
/// which switches every getter to the `sandbox.` key namespace and is safe to
/// call from any thread, so the handle can be shared behind an `Arc`.
///
/// ## Example
///
/// ```
/// use paypal_access_config::ConnectionProperties;
///
/// let props = ConnectionProperties::load()?;
/// let live = props.authorize_endpoint().map(str::to_owned);
///
/// props.init_sandbox();
/// assert_ne!(props.authorize_endpoint().map(str::to_owned), live);
/// # Ok::<(), paypal_access_config::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConnectionProperties {
    values: Properties,
    sandbox: AtomicBool,
}

impl ConnectionProperties {
    /// Loads the bundled `connection-prod.properties` resource.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder().with_bundled(DEFAULT_RESOURCE).build()
    }

    /// Creates a loader with no sources registered.
    pub fn builder() -> PropertiesLoader {
        PropertiesLoader::new()
    }

    pub(crate) fn from_properties(values: Properties) -> Self {
        Self {
            values,
            sandbox: AtomicBool::new(false),
        }
    }

    /// Gets the authorize endpoint URI.
    pub fn authorize_endpoint(&self) -> Option<&str> {
        self.endpoint(Endpoint::Authorize)
    }

    /// Gets the token endpoint URI.
    pub fn token_endpoint(&self) -> Option<&str> {
        self.endpoint(Endpoint::Token)
    }

    /// Gets the check id endpoint URI.
    pub fn check_id_endpoint(&self) -> Option<&str> {
        self.endpoint(Endpoint::CheckId)
    }

    /// Gets the user info endpoint URI.
    pub fn user_info_endpoint(&self) -> Option<&str> {
        self.endpoint(Endpoint::UserInfo)
    }

    /// Gets the disconnect endpoint URI.
    pub fn disconnect_endpoint(&self) -> Option<&str> {
        self.endpoint(Endpoint::Disconnect)
    }

    /// Gets an endpoint URI from the active namespace.
    ///
    /// In sandbox mode a missing `sandbox.` key yields `None`; there is no
    /// fallback to the default namespace.
    pub fn endpoint(&self, endpoint: Endpoint) -> Option<&str> {
        let key = if self.is_sandbox() {
            endpoint.sandbox_key()
        } else {
            endpoint.key()
        };
        self.get(key)
    }

    /// Switches every getter to the sandbox namespace. Idempotent.
    pub fn init_sandbox(&self) {
        if !self.sandbox.swap(true, Ordering::AcqRel) {
            debug!("connection properties switched to sandbox endpoints");
        }
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox.load(Ordering::Acquire)
    }

    /// The prefix applied to endpoint keys: `""` or `"sandbox."`.
    pub fn key_prefix(&self) -> &'static str {
        if self.is_sandbox() {
            SANDBOX_PREFIX
        } else {
            ""
        }
    }

    /// Looks up a raw key, without applying the namespace prefix.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Snapshot of the endpoints in the active namespace.
    pub fn endpoints(&self) -> Endpoints {
        Endpoint::ALL
            .into_iter()
            .fold(Endpoints::default(), |acc, endpoint| {
                match self.endpoint(endpoint) {
                    Some(value) => acc.with(endpoint, value),
                    None => acc,
                }
            })
    }

    /// All loaded properties, both namespaces included.
    pub fn properties(&self) -> &Properties {
        &self.values
    }
}
