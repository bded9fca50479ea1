//! # SqlTools External Tool Launcher
//!
//! Resolves the bundled SSMS dialog tool (downloading it on first use) and
//! launches its server-properties dialog against the active connection.
//!
//! - **`config`**: the static artifact template merged with the install root
//!   and ambient HTTP settings
//! - **`download`**: the tool downloader seam, an HTTPS implementation, and a
//!   preinstalled-path implementation
//! - **`params`**: the launch parameter model and its command-line grammar
//! - **`dialog`**: activation (platform gate, tool resolution, startup
//!   telemetry) and the dialog-launch command
//!
//! Activation never fails: resolution problems are recorded as an
//! [`dialog::ToolResolution::Unavailable`] state and surface to the user only
//! when a launch is attempted.

pub mod config;
pub mod dialog;
pub mod download;
pub mod params;

pub use config::{DownloadConfig, SERVER_PROPERTIES_ACTION, SUPPORTED_PLATFORM};
pub use dialog::{LaunchError, Launcher, ToolResolution, activate};
pub use download::{DownloadError, HttpToolDownloader, PreinstalledTool, ToolDownloader};
pub use params::LaunchParams;
