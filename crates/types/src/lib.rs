//! Shared type definitions for the SqlTools workspace.
//!
//! This crate holds the data models exchanged between the formatter picker,
//! the external tool launcher, and the CLI: text document primitives,
//! connection profiles, and the telemetry event vocabulary. It deliberately
//! contains no behavior beyond what the types themselves own, so every other
//! crate can depend on it without pulling in runtime machinery.

pub mod connection;
pub mod document;
pub mod telemetry;

pub use connection::{AuthenticationKind, ConnectionContext, ConnectionProfile};
pub use document::{Document, Position, Range, TextEdit};
pub use telemetry::{FormatMode, TelemetryEvent, UNKNOWN_EXTENSION};
