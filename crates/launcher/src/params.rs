//! Launch parameters and their command-line grammar.

use sqltools_types::ConnectionProfile;

/// Parameters forwarded to the external dialog tool for one launch.
///
/// Constructed per invocation from the active connection profile and consumed
/// immediately. `use_aad` and the credential fields are mutually exclusive:
/// [`LaunchParams::from_profile`] never carries a user or password for a
/// federated connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    /// Identifier of the dialog to open.
    pub action: String,
    pub server: String,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// True when the connection authenticates through federated AAD.
    pub use_aad: bool,
    /// Optional locator of the target object within the tool's hierarchy.
    pub urn: Option<String>,
}

impl LaunchParams {
    /// Build launch parameters from a connection profile.
    pub fn from_profile(
        action: impl Into<String>,
        profile: &ConnectionProfile,
        urn: Option<String>,
    ) -> Self {
        let use_aad = profile.authentication_type.is_federated();
        Self {
            action: action.into(),
            server: profile.server_name.clone(),
            database: profile.database_name.clone(),
            user: if use_aad { None } else { profile.user_name.clone() },
            password: if use_aad { None } else { profile.password.clone() },
            use_aad,
            urn,
        }
    }

    /// Serialize into the flag string understood by the tool.
    ///
    /// Flags appear in a fixed order with double-quoted values; each segment
    /// after the first carries its own leading space and absent fields
    /// contribute nothing. The result is not whitespace-normalized.
    pub fn build_command_args(&self) -> String {
        let mut args = String::new();
        if !self.action.is_empty() {
            args.push_str(&format!("-a \"{}\"", self.action));
        }
        if !self.server.is_empty() {
            args.push_str(&format!(" -S \"{}\"", self.server));
        }
        if let Some(database) = &self.database {
            args.push_str(&format!(" -D \"{database}\""));
        }
        if let Some(user) = &self.user {
            args.push_str(&format!(" -U \"{user}\""));
        }
        if self.use_aad {
            args.push_str(" -G");
        }
        if let Some(urn) = &self.urn {
            args.push_str(&format!(" -u \"{urn}\""));
        }
        args
    }

    /// The payload written to the spawned process's stdin: the password line
    /// (empty when none is set) for password-based auth, nothing for AAD.
    pub fn stdin_payload(&self) -> Option<String> {
        if self.use_aad {
            None
        } else {
            Some(self.password.clone().unwrap_or_default())
        }
    }
}
