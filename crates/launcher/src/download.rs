//! Tool downloader seam and implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::config::DownloadConfig;

/// Error surfaced when the tool cannot be located or downloaded.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("could not build the download client: {0}")]
    Client(reqwest::Error),
    #[error("download request for `{url}` failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("download of `{url}` returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not write tool artifact to `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no tool executable at `{path}`")]
    Missing { path: PathBuf },
}

/// Locates or downloads the external tool.
#[async_trait]
pub trait ToolDownloader: Send + Sync {
    /// Ensure the configured tool is present, returning the executable path.
    async fn ensure_installed(&self, config: &DownloadConfig) -> Result<PathBuf, DownloadError>;
}

/// Downloader that fetches the artifact over HTTPS, honoring the proxy URL
/// and strict-SSL flag from the merged configuration.
///
/// An executable already present in the versioned install directory
/// short-circuits the network entirely.
#[derive(Debug, Default)]
pub struct HttpToolDownloader;

#[async_trait]
impl ToolDownloader for HttpToolDownloader {
    async fn ensure_installed(&self, config: &DownloadConfig) -> Result<PathBuf, DownloadError> {
        let executable = config.executable_path();
        if file_exists(&executable).await {
            debug!(path = %executable.display(), "tool already installed");
            return Ok(executable);
        }

        info!(url = %config.download_url, "downloading external tool");
        let client = build_client(config)?;
        let response = client
            .get(&config.download_url)
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: config.download_url.clone(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url: config.download_url.clone(),
                status: response.status().as_u16(),
            });
        }
        let payload = response
            .bytes()
            .await
            .map_err(|source| DownloadError::Request {
                url: config.download_url.clone(),
                source,
            })?;

        let version_dir = config.versioned_dir();
        fs::create_dir_all(&version_dir)
            .await
            .map_err(|source| DownloadError::Io {
                path: version_dir.clone(),
                source,
            })?;
        fs::write(&executable, &payload)
            .await
            .map_err(|source| DownloadError::Io {
                path: executable.clone(),
                source,
            })?;
        mark_executable(&executable).await?;

        info!(path = %executable.display(), bytes = payload.len(), "tool installed");
        Ok(executable)
    }
}

/// Downloader backed by an already-installed executable; used when the host
/// ships the tool itself or the user points at a local copy.
#[derive(Debug, Clone)]
pub struct PreinstalledTool {
    path: PathBuf,
}

impl PreinstalledTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ToolDownloader for PreinstalledTool {
    async fn ensure_installed(&self, _config: &DownloadConfig) -> Result<PathBuf, DownloadError> {
        if file_exists(&self.path).await {
            Ok(self.path.clone())
        } else {
            Err(DownloadError::Missing {
                path: self.path.clone(),
            })
        }
    }
}

async fn file_exists(path: &std::path::Path) -> bool {
    fs::metadata(path).await.map(|meta| meta.is_file()).unwrap_or(false)
}

fn build_client(config: &DownloadConfig) -> Result<reqwest::Client, DownloadError> {
    let mut builder = reqwest::Client::builder();
    if let Some(proxy_url) = config.http.proxy_url() {
        let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(DownloadError::Client)?;
        builder = builder.proxy(proxy);
    }
    if !config.http.strict_ssl {
        builder = builder.danger_accept_invalid_certs(true);
    }
    builder.build().map_err(DownloadError::Client)
}

#[cfg(unix)]
async fn mark_executable(path: &std::path::Path) -> Result<(), DownloadError> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(0o755);
    fs::set_permissions(path, permissions)
        .await
        .map_err(|source| DownloadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(not(unix))]
async fn mark_executable(_path: &std::path::Path) -> Result<(), DownloadError> {
    Ok(())
}
