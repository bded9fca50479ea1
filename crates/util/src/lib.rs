//! # SqlTools Utility Crate
//!
//! Ambient services shared by the formatter picker, the external tool
//! launcher, and the CLI:
//!
//! - **`telemetry`**: the fire-and-forget telemetry sink seam plus logging,
//!   null, and recording implementations
//! - **`notify`**: the user-notification seam
//! - **`settings`**: JSON-backed HTTP settings (proxy URL, strict SSL)
//! - **`process`**: shell-backed external process execution with
//!   asynchronous exit reporting
//! - **`redact`**: secret scrubbing applied before anything user-supplied is
//!   logged or telemetered

pub mod notify;
pub mod process;
pub mod redact;
pub mod settings;
pub mod telemetry;

pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use process::{ProcessExit, ProcessRunner, RecordingRunner, ShellProcessRunner, SpawnRequest};
pub use redact::redact_sensitive;
pub use settings::{HttpSettings, SettingsError};
pub use telemetry::{LogTelemetry, NullTelemetry, RecordingTelemetry, TelemetrySink};
