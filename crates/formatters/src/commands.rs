//! The two formatter picker commands and their enablement predicates.

use std::sync::Arc;

use sqltools_types::{Document, FormatMode, Range, TelemetryEvent, UNKNOWN_EXTENSION};
use sqltools_util::TelemetrySink;
use tracing::debug;

use crate::picker::{PickItem, PickOutcome, QuickPick, RevealExtension};
use crate::provider::FormatError;
use crate::registry::FormatterRegistry;

/// Whether the document picker command is enabled: the document accepts edits
/// and more than one document formatter is registered for its language.
pub fn document_picker_enabled(registry: &FormatterRegistry, document: &Document) -> bool {
    document.is_writable() && registry.ordered_document_formatters(document).len() > 1
}

/// Whether the selection picker command is enabled: the document accepts
/// edits and more than one range formatter is registered for its language.
pub fn selection_picker_enabled(registry: &FormatterRegistry, document: &Document) -> bool {
    document.is_writable() && registry.ordered_range_formatters(document).len() > 1
}

/// Whether the selection picker appears in context menus: enabled, and the
/// current selection is non-empty.
pub fn selection_menu_visible(
    registry: &FormatterRegistry,
    document: &Document,
    selection: Range,
) -> bool {
    selection_picker_enabled(registry, document) && !selection.is_empty()
}

/// Orchestrates "Format Document With..." and "Format Selection With...".
pub struct FormatterPicker {
    registry: Arc<FormatterRegistry>,
    quick_pick: Arc<dyn QuickPick>,
    reveal: Arc<dyn RevealExtension>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl FormatterPicker {
    pub fn new(
        registry: Arc<FormatterRegistry>,
        quick_pick: Arc<dyn QuickPick>,
        reveal: Arc<dyn RevealExtension>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            registry,
            quick_pick,
            reveal,
            telemetry,
        }
    }

    /// Present the document formatters for `document`, format with the chosen
    /// one, and report the offered set and outcome through telemetry.
    ///
    /// Returns the picked provider's index, or `None` on cancellation.
    pub async fn format_document_with(
        &self,
        document: &mut Document,
    ) -> Result<Option<usize>, FormatError> {
        let providers = self.registry.ordered_document_formatters(document);
        let extensions = extension_keys(providers.iter().map(|provider| provider.extension_id()));
        let items = build_items(
            providers.iter().map(|provider| provider.display_name()),
            &extensions,
        );

        let outcome = self.quick_pick.pick(items, self.reveal.as_ref()).await;
        self.emit_pick(FormatMode::Document, extensions, &outcome);

        match outcome {
            PickOutcome::Picked(index) => {
                let provider = &providers[index];
                debug!(provider = provider.display_name(), "formatting document");
                let edits = provider.format_document(document)?;
                document.apply_edits(edits);
                Ok(Some(index))
            }
            PickOutcome::Cancelled => Ok(None),
        }
    }

    /// Present the range formatters for `document`, format the selection with
    /// the chosen one, and report through telemetry.
    ///
    /// A collapsed selection widens to the full line holding the cursor.
    /// Returns the picked provider's index, or `None` on cancellation.
    pub async fn format_selection_with(
        &self,
        document: &mut Document,
        selection: Range,
    ) -> Result<Option<usize>, FormatError> {
        let target = if selection.is_empty() {
            document.line_range(selection.start.line)
        } else {
            selection
        };

        let providers = self.registry.ordered_range_formatters(document);
        let extensions = extension_keys(providers.iter().map(|provider| provider.extension_id()));
        let items = build_items(
            providers.iter().map(|provider| provider.display_name()),
            &extensions,
        );

        let outcome = self.quick_pick.pick(items, self.reveal.as_ref()).await;
        self.emit_pick(FormatMode::Range, extensions, &outcome);

        match outcome {
            PickOutcome::Picked(index) => {
                let provider = &providers[index];
                debug!(provider = provider.display_name(), ?target, "formatting selection");
                let edits = provider.format_range(document, target)?;
                document.apply_edits(edits);
                Ok(Some(index))
            }
            PickOutcome::Cancelled => Ok(None),
        }
    }

    fn emit_pick(&self, mode: FormatMode, extensions: Vec<String>, outcome: &PickOutcome) {
        let pick = match outcome {
            PickOutcome::Picked(index) => extensions
                .get(*index)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_EXTENSION.to_string()),
            PickOutcome::Cancelled => "none".to_string(),
        };
        self.telemetry.track(TelemetryEvent::FormatterPick {
            mode,
            extensions,
            pick,
        });
    }
}

fn extension_keys<'a>(extensions: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    extensions
        .map(|extension| extension.unwrap_or(UNKNOWN_EXTENSION).to_string())
        .collect()
}

fn build_items<'a>(
    labels: impl Iterator<Item = &'a str>,
    extensions: &[String],
) -> Vec<PickItem> {
    labels
        .zip(extensions)
        .enumerate()
        .map(|(index, (label, extension_id))| PickItem::new(index, label, Some(extension_id.as_str())))
        .collect()
}
