//! Formatting provider seams.

use sqltools_types::{Document, Range, TextEdit};
use thiserror::Error;

/// Error surfaced when a provider fails to produce edits.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The provider ran and reported a failure of its own.
    #[error("formatter `{provider}` failed: {message}")]
    Provider { provider: String, message: String },
}

impl FormatError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// A capability that can rewrite an entire document to apply style rules.
pub trait DocumentFormattingProvider: Send + Sync {
    /// Human-readable label shown in pickers; empty when the provider
    /// supplies none.
    fn display_name(&self) -> &str;

    /// Identifier of the contributing extension, when known.
    fn extension_id(&self) -> Option<&str>;

    /// Produce the edits that format the whole document.
    fn format_document(&self, document: &Document) -> Result<Vec<TextEdit>, FormatError>;
}

/// A capability that can rewrite a region of a document.
pub trait RangeFormattingProvider: Send + Sync {
    /// Human-readable label shown in pickers; empty when the provider
    /// supplies none.
    fn display_name(&self) -> &str;

    /// Identifier of the contributing extension, when known.
    fn extension_id(&self) -> Option<&str>;

    /// Produce the edits that format `range`.
    fn format_range(&self, document: &Document, range: Range) -> Result<Vec<TextEdit>, FormatError>;
}
