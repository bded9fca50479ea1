//! Activation and the dialog-launch command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use sqltools_types::{ConnectionContext, TelemetryEvent};
use sqltools_util::{
    HttpSettings, Notifier, ProcessRunner, SpawnRequest, TelemetrySink, redact_sensitive,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{DownloadConfig, SERVER_PROPERTIES_ACTION, SUPPORTED_PLATFORM};
use crate::download::ToolDownloader;
use crate::params::LaunchParams;

/// Outcome of tool resolution, written once by [`activate`] and read by every
/// subsequent launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResolution {
    /// The tool is installed and ready to spawn.
    Ready { path: PathBuf },
    /// The tool cannot be used on this host; launches fail with the reason.
    Unavailable { reason: String },
}

/// Error surfaced by the launch command.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("SSMS tooling is not available: {reason}")]
    ToolUnavailable { reason: String },
    #[error("no connection profile attached to the launch request")]
    MissingProfile,
}

/// Handle holding the resolved tool state and the seams launches go through.
pub struct Launcher {
    resolution: ToolResolution,
    telemetry: Arc<dyn TelemetrySink>,
    notifier: Arc<dyn Notifier>,
    runner: Arc<dyn ProcessRunner>,
}

/// Resolve the external tool and produce the launch handle.
///
/// Never fails: an unsupported platform or a download error yields a handle
/// in the [`ToolResolution::Unavailable`] state, with the failure reported
/// through telemetry (and, for the platform gate, a one-time notification).
/// The download is the only suspension point and carries no timeout; callers
/// await it for as long as the downloader takes.
pub async fn activate(
    host_os: &str,
    install_root: &Path,
    http: HttpSettings,
    downloader: &dyn ToolDownloader,
    telemetry: Arc<dyn TelemetrySink>,
    notifier: Arc<dyn Notifier>,
    runner: Arc<dyn ProcessRunner>,
) -> Launcher {
    if host_os != SUPPORTED_PLATFORM {
        warn!(host_os, "SSMS tooling unsupported on this platform");
        notifier.notify_error("SSMS tooling is only available on Windows.");
        return Launcher::new(
            ToolResolution::Unavailable {
                reason: format!("unsupported platform: {host_os}"),
            },
            telemetry,
            notifier,
            runner,
        );
    }

    let beginning_timestamp_ms = chrono::Utc::now().timestamp_millis();
    let started_at = Instant::now();
    let config = DownloadConfig::resolve(install_root, http);
    match downloader.ensure_installed(&config).await {
        Ok(path) => {
            telemetry.track(TelemetryEvent::ExtensionStarted {
                installation_time_ms: started_at.elapsed().as_millis(),
                beginning_timestamp_ms,
            });
            info!(path = %path.display(), "SSMS tooling ready");
            Launcher::new(ToolResolution::Ready { path }, telemetry, notifier, runner)
        }
        Err(error) => {
            telemetry.track(TelemetryEvent::ExtensionInitializationFailed);
            warn!(error = %error, "SSMS tooling initialization failed");
            Launcher::new(
                ToolResolution::Unavailable {
                    reason: error.to_string(),
                },
                telemetry,
                notifier,
                runner,
            )
        }
    }
}

impl Launcher {
    /// Build a handle from an already-determined resolution.
    pub fn new(
        resolution: ToolResolution,
        telemetry: Arc<dyn TelemetrySink>,
        notifier: Arc<dyn Notifier>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            resolution,
            telemetry,
            notifier,
            runner,
        }
    }

    pub fn resolution(&self) -> &ToolResolution {
        &self.resolution
    }

    /// Open the server-properties dialog for the context's connection.
    ///
    /// The context's own action request is not consulted; this command always
    /// opens server properties. Returns once the process is spawned and its
    /// stdin handled; the exit is reported through telemetry out-of-band.
    pub async fn launch_server_properties(
        &self,
        context: &ConnectionContext,
    ) -> Result<(), LaunchError> {
        let path = match &self.resolution {
            ToolResolution::Ready { path } => path.clone(),
            ToolResolution::Unavailable { reason } => {
                self.notifier
                    .notify_error("SSMS tooling was not installed; the dialog cannot be opened.");
                return Err(LaunchError::ToolUnavailable {
                    reason: reason.clone(),
                });
            }
        };

        let Some(profile) = &context.connection_profile else {
            self.notifier
                .notify_error("No active connection to open server properties for.");
            return Err(LaunchError::MissingProfile);
        };

        let params = LaunchParams::from_profile(SERVER_PROPERTIES_ACTION, profile, context.urn.clone());
        self.telemetry.track(TelemetryEvent::LaunchSsmsDialog {
            action: params.action.clone(),
        });

        let request = SpawnRequest {
            program: path,
            raw_args: params.build_command_args(),
            stdin_payload: params.stdin_payload(),
        };
        debug!(program = %request.program.display(), "launching SSMS dialog");
        let exit_rx = self.runner.spawn(request).await;

        let telemetry = Arc::clone(&self.telemetry);
        let action = params.action;
        tokio::spawn(async move {
            let exit = match exit_rx.await {
                Ok(exit) => exit,
                Err(_closed) => return,
            };
            telemetry.track(TelemetryEvent::LaunchSsmsDialogResult {
                action,
                return_code: exit.code,
                error: redact_sensitive(&exit.stderr),
            });
        });

        Ok(())
    }
}
