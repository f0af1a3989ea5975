use std::fmt;

use serde::{Deserialize, Serialize};

/// Key prefix selecting the sandbox namespace.
///
/// [`Endpoint::sandbox_key`] spells out each prefixed key as a `&'static str`;
/// keep those literals in step with this prefix.
pub const SANDBOX_PREFIX: &str = "sandbox.";

/// The PayPal Access OpenID Connect endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// User authorization (login and consent) page.
    Authorize,
    /// Authorization code and refresh token exchange.
    Token,
    /// Identity check of an access token.
    CheckId,
    /// User profile retrieval.
    UserInfo,
    /// Session end and token revocation.
    Disconnect,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Authorize,
        Endpoint::Token,
        Endpoint::CheckId,
        Endpoint::UserInfo,
        Endpoint::Disconnect,
    ];

    /// Property key in the default namespace.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Endpoint::Authorize => "authorizeEndpoint",
            Endpoint::Token => "tokenEndpoint",
            Endpoint::CheckId => "checkidEndpoint",
            Endpoint::UserInfo => "userinfoEndpoint",
            Endpoint::Disconnect => "disconnectEndpoint",
        }
    }

    /// Property key in the sandbox namespace.
    #[must_use]
    pub const fn sandbox_key(self) -> &'static str {
        match self {
            Endpoint::Authorize => "sandbox.authorizeEndpoint",
            Endpoint::Token => "sandbox.tokenEndpoint",
            Endpoint::CheckId => "sandbox.checkidEndpoint",
            Endpoint::UserInfo => "sandbox.userinfoEndpoint",
            Endpoint::Disconnect => "sandbox.disconnectEndpoint",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Endpoint::Authorize => "Authorize endpoint",
            Endpoint::Token => "Token endpoint",
            Endpoint::CheckId => "Check Id endpoint",
            Endpoint::UserInfo => "User Info endpoint",
            Endpoint::Disconnect => "Disconnect endpoint",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Endpoint values for one namespace.
///
/// Serializes under the property key names, so a TOML table of
/// `authorizeEndpoint = "..."` style entries deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoints {
    #[serde(rename = "authorizeEndpoint", skip_serializing_if = "Option::is_none")]
    pub authorize: Option<String>,
    #[serde(rename = "tokenEndpoint", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "checkidEndpoint", skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,
    #[serde(rename = "userinfoEndpoint", skip_serializing_if = "Option::is_none")]
    pub user_info: Option<String>,
    #[serde(rename = "disconnectEndpoint", skip_serializing_if = "Option::is_none")]
    pub disconnect: Option<String>,
}

impl Endpoints {
    #[must_use]
    pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
        match endpoint {
            Endpoint::Authorize => self.authorize.as_deref(),
            Endpoint::Token => self.token.as_deref(),
            Endpoint::CheckId => self.check_id.as_deref(),
            Endpoint::UserInfo => self.user_info.as_deref(),
            Endpoint::Disconnect => self.disconnect.as_deref(),
        }
    }

    /// Sets one endpoint, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, endpoint: Endpoint, value: impl Into<String>) -> Self {
        let slot = match endpoint {
            Endpoint::Authorize => &mut self.authorize,
            Endpoint::Token => &mut self.token,
            Endpoint::CheckId => &mut self.check_id,
            Endpoint::UserInfo => &mut self.user_info,
            Endpoint::Disconnect => &mut self.disconnect,
        };
        *slot = Some(value.into());
        self
    }

    /// Returns `true` when all five endpoints are set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Endpoint::ALL.iter().all(|&e| self.get(e).is_some())
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (Endpoint, String)> {
        let Endpoints {
            authorize,
            token,
            check_id,
            user_info,
            disconnect,
        } = self;

        Endpoint::ALL
            .into_iter()
            .zip([authorize, token, check_id, user_info, disconnect])
            .filter_map(|(endpoint, value)| value.map(|v| (endpoint, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_keys_carry_prefix() {
        for endpoint in Endpoint::ALL {
            assert_eq!(
                endpoint.sandbox_key(),
                format!("{SANDBOX_PREFIX}{}", endpoint.key())
            );
        }
    }

    #[test]
    fn test_endpoints_deserialize_from_property_names() {
        let endpoints: Endpoints = toml::from_str(
            r#"
            authorizeEndpoint = "https://idp.example/authorize"
            userinfoEndpoint = "https://idp.example/userinfo"
            "#,
        )
        .unwrap();

        assert_eq!(
            endpoints.get(Endpoint::Authorize),
            Some("https://idp.example/authorize")
        );
        assert_eq!(
            endpoints.get(Endpoint::UserInfo),
            Some("https://idp.example/userinfo")
        );
        assert_eq!(endpoints.get(Endpoint::Token), None);
        assert!(!endpoints.is_complete());
    }

    #[test]
    fn test_into_entries_skips_unset() {
        let entries: Vec<_> = Endpoints::default()
            .with(Endpoint::Token, "t")
            .with(Endpoint::Disconnect, "d")
            .into_entries()
            .collect();

        assert_eq!(
            entries,
            vec![
                (Endpoint::Token, "t".to_string()),
                (Endpoint::Disconnect, "d".to_string()),
            ]
        );
    }
}
