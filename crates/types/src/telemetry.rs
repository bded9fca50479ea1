//! Telemetry event vocabulary.
//!
//! Events form a closed set so sinks can rely on stable names and property
//! keys. Property maps preserve insertion order (via `IndexMap`) because the
//! rendered payload is part of the observable contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel extension identifier for providers that do not declare one.
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// Which surface a formatter pick was invoked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    Document,
    Range,
}

impl FormatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Range => "range",
        }
    }
}

/// A single telemetry record.
///
/// `name()` and `properties()` together form the wire shape; sinks decide
/// transport and batching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// A formatter picker ran: which providers were offered and what the user
    /// chose (`"none"` on cancellation).
    FormatterPick {
        mode: FormatMode,
        extensions: Vec<String>,
        pick: String,
    },
    /// Tool resolution finished during activation.
    ExtensionStarted {
        installation_time_ms: u128,
        beginning_timestamp_ms: i64,
    },
    /// Tool resolution failed during activation.
    ExtensionInitializationFailed,
    /// A dialog launch was requested, before the process is spawned.
    LaunchSsmsDialog { action: String },
    /// The spawned dialog process exited.
    LaunchSsmsDialogResult {
        action: String,
        return_code: i32,
        error: String,
    },
}

impl TelemetryEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FormatterPick { .. } => "formatterpick",
            Self::ExtensionStarted { .. } => "startup/ExtensionStarted",
            Self::ExtensionInitializationFailed => "startup/ExtensionInitializationFailed",
            Self::LaunchSsmsDialog { .. } => "LaunchSsmsDialog",
            Self::LaunchSsmsDialogResult { .. } => "LaunchSsmsDialogResult",
        }
    }

    /// Render the event payload as ordered string properties.
    pub fn properties(&self) -> IndexMap<String, String> {
        let mut properties = IndexMap::new();
        match self {
            Self::FormatterPick { mode, extensions, pick } => {
                properties.insert("mode".into(), mode.as_str().into());
                properties.insert(
                    "extensions".into(),
                    serde_json::to_string(extensions).unwrap_or_else(|_| "[]".into()),
                );
                properties.insert("pick".into(), pick.clone());
            }
            Self::ExtensionStarted {
                installation_time_ms,
                beginning_timestamp_ms,
            } => {
                properties.insert("installationTime".into(), installation_time_ms.to_string());
                properties.insert("beginningTimestamp".into(), beginning_timestamp_ms.to_string());
            }
            Self::ExtensionInitializationFailed => {}
            Self::LaunchSsmsDialog { action } => {
                properties.insert("action".into(), action.clone());
            }
            Self::LaunchSsmsDialogResult {
                action,
                return_code,
                error,
            } => {
                properties.insert("action".into(), action.clone());
                properties.insert("returnCode".into(), return_code.to_string());
                properties.insert("error".into(), error.clone());
            }
        }
        properties
    }
}
