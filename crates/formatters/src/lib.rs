//! # SqlTools Formatter Picker
//!
//! Lets a user choose which registered formatting provider should format the
//! current document or selection. The crate is orchestration over seams the
//! host supplies:
//!
//! - **`provider`**: the document/range formatting provider traits
//! - **`registry`**: ordered per-language provider resolution, including
//!   document formatters synthesized from range-only providers
//! - **`picker`**: the quick-pick and reveal-extension seams
//! - **`commands`**: the two picker commands, their enablement predicates,
//!   and formatter-pick telemetry
//!
//! Provider ordering is whatever the registry returns; commands only index
//! into it, and the list is resolved once per invocation so indices stay
//! valid between presentation and dispatch.

pub mod commands;
pub mod picker;
pub mod provider;
pub mod registry;

pub use commands::{
    FormatterPicker, document_picker_enabled, selection_menu_visible, selection_picker_enabled,
};
pub use picker::{PickItem, PickOutcome, QuickPick, RevealExtension};
pub use provider::{DocumentFormattingProvider, FormatError, RangeFormattingProvider};
pub use registry::FormatterRegistry;
