//! In-memory formatting provider registry.
//!
//! Providers register per language identifier. Resolution returns providers
//! in registration order; callers rely on that order staying stable for the
//! lifetime of one command invocation, since picker selections are mapped
//! back by list position.

use std::sync::Arc;

use sqltools_types::Document;
use tracing::debug;

use crate::provider::{DocumentFormattingProvider, FormatError, RangeFormattingProvider};

struct DocumentRegistration {
    language_id: String,
    provider: Arc<dyn DocumentFormattingProvider>,
}

struct RangeRegistration {
    language_id: String,
    provider: Arc<dyn RangeFormattingProvider>,
}

/// Registry of formatting providers keyed by language.
#[derive(Default)]
pub struct FormatterRegistry {
    document_providers: Vec<DocumentRegistration>,
    range_providers: Vec<RangeRegistration>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a whole-document provider for `language_id`.
    pub fn register_document(
        &mut self,
        language_id: impl Into<String>,
        provider: Arc<dyn DocumentFormattingProvider>,
    ) {
        self.document_providers.push(DocumentRegistration {
            language_id: language_id.into(),
            provider,
        });
    }

    /// Register a range provider for `language_id`.
    pub fn register_range(
        &mut self,
        language_id: impl Into<String>,
        provider: Arc<dyn RangeFormattingProvider>,
    ) {
        self.range_providers.push(RangeRegistration {
            language_id: language_id.into(),
            provider,
        });
    }

    /// Ordered document formatters for `document`'s language: genuinely
    /// registered document providers first, then adapters synthesized over
    /// range providers that have no document counterpart (same extension and
    /// label). The synthesized entries format by applying the range provider
    /// to the full document range.
    pub fn ordered_document_formatters(
        &self,
        document: &Document,
    ) -> Vec<Arc<dyn DocumentFormattingProvider>> {
        let mut resolved: Vec<Arc<dyn DocumentFormattingProvider>> = self
            .document_providers
            .iter()
            .filter(|registration| registration.language_id == document.language_id)
            .map(|registration| Arc::clone(&registration.provider))
            .collect();

        for registration in &self.range_providers {
            if registration.language_id != document.language_id {
                continue;
            }
            let already_covered = resolved.iter().any(|provider| {
                provider.extension_id() == registration.provider.extension_id()
                    && provider.display_name() == registration.provider.display_name()
            });
            if !already_covered {
                resolved.push(Arc::new(FullDocumentAdapter {
                    inner: Arc::clone(&registration.provider),
                }));
            }
        }

        debug!(
            language = %document.language_id,
            count = resolved.len(),
            "resolved document formatters"
        );
        resolved
    }

    /// Ordered range formatters for `document`'s language. No synthesis:
    /// only genuinely registered range providers appear.
    pub fn ordered_range_formatters(
        &self,
        document: &Document,
    ) -> Vec<Arc<dyn RangeFormattingProvider>> {
        let resolved: Vec<Arc<dyn RangeFormattingProvider>> = self
            .range_providers
            .iter()
            .filter(|registration| registration.language_id == document.language_id)
            .map(|registration| Arc::clone(&registration.provider))
            .collect();
        debug!(
            language = %document.language_id,
            count = resolved.len(),
            "resolved range formatters"
        );
        resolved
    }
}

/// Document formatter synthesized from a range-only provider.
struct FullDocumentAdapter {
    inner: Arc<dyn RangeFormattingProvider>,
}

impl DocumentFormattingProvider for FullDocumentAdapter {
    fn display_name(&self) -> &str {
        self.inner.display_name()
    }

    fn extension_id(&self) -> Option<&str> {
        self.inner.extension_id()
    }

    fn format_document(
        &self,
        document: &Document,
    ) -> Result<Vec<sqltools_types::TextEdit>, FormatError> {
        self.inner.format_range(document, document.full_range())
    }
}
