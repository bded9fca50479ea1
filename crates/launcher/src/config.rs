//! Download configuration for the external SSMS dialog tool.

use std::path::{Path, PathBuf};

use sqltools_util::HttpSettings;

/// Dialog identifier for server properties within the external tool.
pub const SERVER_PROPERTIES_ACTION: &str = "sqla:Properties";

/// The only platform the external tool ships for.
pub const SUPPORTED_PLATFORM: &str = "windows";

/// Tool artifact template. The URL substitutes `{version}`.
const TOOL_NAME: &str = "ssmsmin";
const TOOL_VERSION: &str = "17.0.1";
const EXECUTABLE_NAME: &str = "ssmsmin.exe";
const DOWNLOAD_URL_TEMPLATE: &str =
    "https://download.sqltools.dev/ssmsmin/{version}/ssmsmin-{version}-win-x64.exe";

/// A fully merged download configuration: the static template plus the host
/// install root and ambient HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    pub tool_name: String,
    pub version: String,
    /// Resolved artifact URL (template with `{version}` substituted).
    pub download_url: String,
    pub executable_name: String,
    /// Root directory tool versions install under.
    pub install_root: PathBuf,
    /// Proxy and TLS behavior for the download.
    pub http: HttpSettings,
}

impl DownloadConfig {
    /// Merge the static template with `install_root` and `http`.
    pub fn resolve(install_root: &Path, http: HttpSettings) -> Self {
        Self {
            tool_name: TOOL_NAME.to_string(),
            version: TOOL_VERSION.to_string(),
            download_url: DOWNLOAD_URL_TEMPLATE.replace("{version}", TOOL_VERSION),
            executable_name: EXECUTABLE_NAME.to_string(),
            install_root: install_root.to_path_buf(),
            http,
        }
    }

    /// Versioned directory the artifact installs into.
    pub fn versioned_dir(&self) -> PathBuf {
        self.install_root.join(format!("{}-{}", self.tool_name, self.version))
    }

    /// Full path of the installed executable.
    pub fn executable_path(&self) -> PathBuf {
        self.versioned_dir().join(&self.executable_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_substitutes_the_version_into_the_url() {
        let config = DownloadConfig::resolve(Path::new("/opt/sqltools"), HttpSettings::default());
        assert_eq!(
            config.download_url,
            "https://download.sqltools.dev/ssmsmin/17.0.1/ssmsmin-17.0.1-win-x64.exe"
        );
        assert!(!config.download_url.contains("{version}"));
    }

    #[test]
    fn executable_lives_in_a_versioned_directory() {
        let config = DownloadConfig::resolve(Path::new("/opt/sqltools"), HttpSettings::default());
        assert_eq!(
            config.executable_path(),
            PathBuf::from("/opt/sqltools/ssmsmin-17.0.1/ssmsmin.exe")
        );
    }
}
