//! Connection profile models shared between the launcher and the CLI.

use serde::{Deserialize, Serialize};

/// How a connection authenticates against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthenticationKind {
    /// Server-validated user name and password.
    #[default]
    SqlLogin,
    /// OS-integrated authentication; no credentials are transmitted.
    Integrated,
    /// Federated Azure Active Directory authentication.
    AzureMfa,
}

impl AuthenticationKind {
    /// True for the federated mode, where no password is required or
    /// transmitted and the external tool authenticates on its own.
    pub fn is_federated(&self) -> bool {
        matches!(self, Self::AzureMfa)
    }
}

/// The attributes of an active connection, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProfile {
    /// Server host name; the only mandatory attribute.
    pub server_name: String,
    #[serde(default)]
    pub database_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub authentication_type: AuthenticationKind,
}

/// Context object handed to launch commands by the host.
///
/// The profile is optional: commands invoked outside a connection view carry
/// no profile and handlers are expected to reject them gracefully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionContext {
    #[serde(default)]
    pub connection_profile: Option<ConnectionProfile>,
    /// Optional locator naming a specific object node within the tool's
    /// object hierarchy.
    #[serde(default)]
    pub urn: Option<String>,
}
